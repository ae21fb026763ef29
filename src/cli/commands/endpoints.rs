use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::http::{EndpointResolver, ServiceRole};

#[derive(Args, Debug)]
pub struct EndpointsArgs {
    /// Target host, overriding configuration
    #[arg(long)]
    pub host: Option<String>,
}

pub async fn execute(args: EndpointsArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let host = args.host.unwrap_or(config.service_host);
    let resolver = EndpointResolver::new(host)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["role", "port", "base url"]);
    for role in ServiceRole::ALL {
        let url = resolver.resolve(role, role.path_prefix())?;
        table.add_row(vec![
            role.to_string(),
            role.port().to_string(),
            url.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
