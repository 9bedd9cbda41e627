fn main() -> anyhow::Result<()> {
    boat_scene::run(boat_scene::SceneConfig::default())
}
