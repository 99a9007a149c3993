use clap::Args;

#[derive(Debug, Args)]
pub struct WebArgs {
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    /// Mount every route under this path, e.g. `/facette`.
    #[arg(long)]
    pub url_prefix: Option<String>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Space-separated terms; every term must appear in a matching name.
    pub query: String,
}
