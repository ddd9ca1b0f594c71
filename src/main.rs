fn main() {
    #[cfg(feature = "cli")]
    qpcodec::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("qpcodec: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
