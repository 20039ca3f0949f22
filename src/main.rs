use treelight::SceneConfig;

fn main() {
    if let Err(e) = treelight::run(SceneConfig::default()) {
        eprintln!("Failed to start scene: {e}");
        std::process::exit(1);
    }
}
