use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = name_culling::cli::parse();
    app::run(args)
}
