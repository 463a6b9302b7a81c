fn main() {
    recon::cli::run();
}
