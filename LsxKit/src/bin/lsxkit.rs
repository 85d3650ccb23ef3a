fn main() -> anyhow::Result<()> {
    lsxkit::cli::run_cli()
}
