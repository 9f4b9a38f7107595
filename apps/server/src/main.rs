use anyhow::Context;
use mdesk::kernel::config::load_config;
use mdesk_logger::Logger;
use mdesk_runtime::RuntimeConfig;
use mdesk_server::Server;

fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg = load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let runtime = mdesk_runtime::build_runtime_with_config(&RuntimeConfig::high_performance())?;
    runtime.block_on(async { Server::builder().config(cfg).build()?.run().await })
}
