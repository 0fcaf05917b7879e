fn main() {
    pixel_adventure::game::run();
}
