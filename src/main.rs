use anyhow::Result;

fn main() -> Result<()> {
    stargazer::cli::run()
}
