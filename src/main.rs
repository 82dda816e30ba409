fn main() {
    #[cfg(feature = "cli")]
    reldiff::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("reldiff: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
