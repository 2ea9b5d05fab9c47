fn main() -> anyhow::Result<()> {
    pollster::block_on(avatar_view::run())
}
