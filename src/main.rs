fn main() {
    armory::game::run();
}
