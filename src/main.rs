fn main() {
    copyforge::app::cli::run();
}
