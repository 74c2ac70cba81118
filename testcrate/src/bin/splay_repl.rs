//! Small interactive demonstration of the keyed container. Reads actions
//! from stdin and prints the tree structure after each mutation.

use std::io::{self, BufRead};

use splay_arena::{Natural, SplayForest};
use testcrate::P0;

fn main() -> io::Result<()> {
    println!("Demonstration of splay tree functionality");
    println!("Available actions: insert NUMBER, delete NUMBER, find NUMBER, finish.");

    let mut forest: SplayForest<P0, i64, Natural> = SplayForest::new();
    let mut tree = forest.new_tree();
    println!("Initial tree: {}", forest.debug_tree(&tree));

    let stdin = io::stdin();
    println!("Enter action: ");
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let action = match words.next() {
            Some(action) => action,
            None => {
                println!("Enter action: ");
                continue
            }
        };
        let number = words.next().and_then(|w| w.parse::<i64>().ok());
        match (action, number) {
            ("insert", Some(v)) => {
                // duplicates are silently left in place
                let _ = forest.insert(&mut tree, v);
                println!("Tree: {}", forest.debug_tree(&tree));
            }
            ("delete", Some(k)) => {
                if let Some(p) = forest.find(&mut tree, &k) {
                    if let Some((v, _)) = forest.remove(&mut tree, p) {
                        println!("{v}");
                    }
                }
                println!("Tree: {}", forest.debug_tree(&tree));
            }
            ("find", Some(k)) => {
                match forest.find(&mut tree, &k) {
                    Some(p) => {
                        let v = forest.get(p).unwrap();
                        let s = forest.subtree_size(p).unwrap();
                        println!("Node: [v={v}, s={s}]");
                    }
                    None => println!("Key not found"),
                }
                println!("Tree: {}", forest.debug_tree(&tree));
            }
            ("finish", _) => break,
            _ => println!("Unknown action"),
        }
        println!("Enter action: ");
    }
    Ok(())
}
