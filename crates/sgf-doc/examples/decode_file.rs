//! Prints the tree of an SGF file without running the engine.

use std::fs;

use sgf_doc::model::{Game, NodeId};
use sgf_doc::{decode_document, BoardSizeStatus};

fn print_node(game: &Game, id: NodeId, depth: usize) {
    let Some(node) = game.node(id) else { return };
    let props: Vec<String> = node
        .properties()
        .iter()
        .map(|p| {
            let values: Vec<String> = p.values().iter().map(|v| format!("[{}]", v.raw_value())).collect();
            format!("{}{}", p.name(), values.join(""))
        })
        .collect();
    println!("{};{}", "  ".repeat(depth), props.join(" "));
    let children = game.children(id);
    let depth = if children.len() > 1 { depth + 1 } else { depth };
    for child in children {
        print_node(game, *child, depth);
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "game.sgf".to_string());

    println!("Reading: {}", path);

    let text = fs::read_to_string(&path).expect("Failed to read file");
    let doc = decode_document(&text).expect("Failed to decode");

    for (i, game) in doc.games().iter().enumerate() {
        println!("\n=== Game {} ===", i + 1);
        println!("Type: {:?} ({})", game.game_type(), game.game_type_as_number());
        match game.board_size() {
            BoardSizeStatus::Valid(size) => println!("Board: {}x{}", size.columns, size.rows),
            BoardSizeStatus::Invalid => println!("Board: invalid SZ"),
            BoardSizeStatus::None => println!("Board: not set"),
        }
        println!("Nodes: {}", game.node_count());
        if let Some(root) = game.root() {
            print_node(game, root, 0);
        }
    }
}
