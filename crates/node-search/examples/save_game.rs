//! Builds a small level and collects the nodes a save-game pass would persist
//!
//! Usage:
//!   cargo run --example save_game [class]
//!
//! If no class is provided, searches for `Persist` nodes. Set `RUST_LOG=trace`
//! to watch the walk.

use anyhow::{Context, Result};
use node_search::prelude::*;
use scene_tree::prelude::*;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let class = env::args().nth(1).unwrap_or_else(|| "Persist".to_string());

    let mut scene = build_level().context("Failed to build level")?;
    println!("Level loaded: {} nodes", scene.node_count());
    println!();

    print_matches(&scene, "Closest", &class, SearchPolicy::Closest)?;
    print_matches(&scene, "All", &class, SearchPolicy::All)?;

    // Destroy a chest halfway through a paused walk
    let mut search = SubtreeSearch::new(scene.root(), Class::new(class.as_str()), SearchPolicy::All)?;
    let first = search.next_match(&scene);
    if let Some(chest) = scene.find_by_name("chest") {
        scene.remove(chest).context("Failed to remove chest")?;
        println!("Removed chest mid-walk");
    }
    let rest: Vec<_> = search.walk(&scene).collect();
    println!(
        "  first: {}, remaining: {}",
        first.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        rest.len()
    );

    Ok(())
}

fn print_matches(
    scene: &SceneTree<u32>,
    label: &str,
    class: &str,
    policy: SearchPolicy,
) -> Result<()> {
    let search = SubtreeSearch::new(scene.root(), Class::new(class), policy)?;

    println!("{} `{}` descendants:", label, class);
    for id in search.walk(scene) {
        let indent = "  ".repeat(scene.depth(id));
        println!("{}{}", indent, scene.path(id));
    }
    println!();
    Ok(())
}

fn build_level() -> Result<SceneTree<u32>, TreeError> {
    let mut scene = SceneTree::new(Node::new("level", "Node2D", 0));
    let root = scene.root();

    let player = scene.add_child(root, Node::new("player", "Persist", 100))?;
    scene.add_child(player, Node::new("sprite", "Sprite", 0))?;
    scene.add_child(player, Node::new("inventory", "Persist", 3))?;

    let props = scene.add_child(root, Node::new("props", "Node2D", 0))?;
    let chest = scene.add_child(props, Node::new("chest", "Persist", 1))?;
    scene.add_child(chest, Node::new("gold", "Persist", 250))?;
    scene.add_child(props, Node::new("barrel", "Sprite", 0))?;

    scene.add_child(root, Node::new("hud", "Control", 0))?;
    Ok(scene)
}
