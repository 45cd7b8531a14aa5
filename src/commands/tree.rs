//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the package
//! dependency tree the collector would walk.
//!
//! ## Functionality
//!
//! - **Dependency Tree Visualization**: one line per package, `name@version`
//! - **Contributors**: packages declaring a `build.gcc` block are marked
//!   with `[gcc]`
//! - **Depth Control**: `--depth` limits how much of the tree is shown
//!
//! This command is a safe, read-only operation.

use anyhow::{Context, Result};
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::path::PathBuf;

use gcc_options::phases::{discovery, PackageNode};
use gcc_options::resolver::NodeModulesResolver;

use super::load_config;

/// Display the package dependency tree
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Project directory containing the root package.json
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Path to a run configuration file (defaults to <project>/.gcc-options.yaml)
    #[arg(short, long, value_name = "FILE", env = "GCC_OPTIONS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the root package, 1 to show its direct dependencies, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.project)?;
    let resolver = NodeModulesResolver::new();

    let tree = discovery::execute(&args.project, &config.discovery_options(), &resolver)
        .with_context(|| format!("Failed to discover packages in {}", args.project.display()))?;

    let root = build_tree_node(&tree.root, args.depth.unwrap_or(usize::MAX));
    print_tree(&root).context("Failed to display tree")?;

    Ok(())
}

/// Build the display node for `node`, cutting children below `max_depth`.
fn build_tree_node(node: &PackageNode, max_depth: usize) -> TreeNode {
    let mut label = node.package.id().to_string();
    if node.package.compiler_options().is_some() {
        label.push_str(" [gcc]");
    }

    let children = if node.depth >= max_depth {
        vec![]
    } else {
        node.children
            .iter()
            .map(|child| build_tree_node(child, max_depth))
            .collect()
    };
    TreeNode { label, children }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
