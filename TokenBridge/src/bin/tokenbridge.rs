fn main() -> anyhow::Result<()> {
    tokenbridge::cli::run_cli()
}
