fn main() {
    midart_frontend::run();
}
