fn main() {
    assurance::cli::run();
}
