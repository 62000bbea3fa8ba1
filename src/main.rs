fn main() {
    ripple::main();
}
