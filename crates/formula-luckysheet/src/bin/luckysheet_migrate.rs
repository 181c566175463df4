fn main() -> anyhow::Result<()> {
    formula_luckysheet::cli::run()
}
