use clap::Parser;
use treegen::generator::{Orientation, TreeGenerator};
use treegen::trie::{prefix_tree, recover_paths, NIL, ROOT};
use treegen::TreeGraph;

/// Builds a prefix tree from the given words and a random tree, then prints both.
#[derive(Parser, Debug)]
#[command(name = "treegen", version)]
struct Args {
    /// Number of nodes of the random tree
    #[arg(short, long, default_value_t = 10)]
    nodes: usize,

    /// Seed for the random tree
    #[arg(short, long, default_value_t = treegen::K_RAND_SEED)]
    seed: u64,

    /// Orient the random tree away from node 0
    #[arg(short, long)]
    directed: bool,

    /// Words to put into the prefix tree
    words: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.words.is_empty() {
        let trie = prefix_tree(args.words.iter().map(|w| w.chars()));
        println!("---------- PREFIX TREE ----------");
        println!("  Num Nodes          - {}", trie.num_nodes());
        println!("  Num Edges          - {}", trie.num_edges());
        println!("  Root Children      - {}", trie.out_degree(ROOT));
        println!("  Words              - {}", trie.in_degree(NIL));
        for (u, v) in trie.edges() {
            println!("  {} -> {}", u, v);
        }
        for path in recover_paths(&trie) {
            println!("  {}", path.into_iter().collect::<String>());
        }
    }

    let orientation = if args.directed {
        Orientation::RootedAt(0)
    } else {
        Orientation::Undirected
    };
    let tree = TreeGenerator::new(args.nodes)
        .with_seed(args.seed)
        .with_orientation(orientation)
        .generate()?;

    println!("---------- RANDOM TREE ----------");
    println!("  Num Nodes          - {}", tree.num_nodes());
    println!("  Num Edges          - {}", tree.num_edges());
    for (u, v) in tree.edges() {
        let arrow = if tree.is_directed() { "->" } else { "--" };
        println!("  {} {} {}", u, arrow, v);
    }
    Ok(())
}
