// tree.rs - Neighbor-joining tree construction (Saitou & Nei 1987)

use crate::core::distance::DistanceMatrix;

/// Node in a binary phylogenetic tree
///
/// Children are indices into the owning tree's node arena; branch
/// lengths belong to the edge from this node down to each child.
#[derive(Debug, Clone)]
pub enum TreeNode {
    Leaf {
        title: String,
    },
    Internal {
        left: usize,
        right: usize,
        left_len: f64,
        right_len: f64,
    },
}

/// Rooted binary tree produced by neighbor joining
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    root: usize,
}

impl Tree {
    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, idx: usize) -> &TreeNode {
        &self.nodes[idx]
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }

    /// Leaf titles in display (left-to-right) order
    pub fn leaf_titles(&self) -> Vec<&str> {
        let mut titles = Vec::new();
        self.collect_leaves(self.root, &mut titles);
        titles
    }

    fn collect_leaves<'a>(&'a self, idx: usize, out: &mut Vec<&'a str>) {
        match &self.nodes[idx] {
            TreeNode::Leaf { title } => out.push(title),
            TreeNode::Internal { left, right, .. } => {
                self.collect_leaves(*left, out);
                self.collect_leaves(*right, out);
            }
        }
    }

    /// Newick serialization with 6-decimal branch lengths
    pub fn newick(&self) -> String {
        let mut out = String::new();
        self.write_newick(self.root, &mut out);
        out.push(';');
        out
    }

    fn write_newick(&self, idx: usize, out: &mut String) {
        match &self.nodes[idx] {
            TreeNode::Leaf { title } => out.push_str(title),
            TreeNode::Internal {
                left,
                right,
                left_len,
                right_len,
            } => {
                out.push('(');
                self.write_newick(*left, out);
                out.push_str(&format!(":{:.6}", left_len));
                out.push(',');
                self.write_newick(*right, out);
                out.push_str(&format!(":{:.6}", right_len));
                out.push(')');
            }
        }
    }

    /// Sum of branch lengths on the path between two leaves
    pub fn path_length(&self, a: &str, b: &str) -> Option<f64> {
        let path_a = self.path_to_leaf(self.root, a)?;
        let path_b = self.path_to_leaf(self.root, b)?;

        // Drop the shared prefix down to the deepest common ancestor
        let mut k = 0;
        while k < path_a.len() && k < path_b.len() && path_a[k].0 == path_b[k].0 {
            k += 1;
        }
        let below: f64 = path_a[k..].iter().map(|(_, l)| l).sum::<f64>()
            + path_b[k..].iter().map(|(_, l)| l).sum::<f64>();
        Some(below)
    }

    /// Edges (child index, branch length) from `idx` down to the named leaf
    fn path_to_leaf(&self, idx: usize, title: &str) -> Option<Vec<(usize, f64)>> {
        match &self.nodes[idx] {
            TreeNode::Leaf { title: t } => {
                if t == title {
                    Some(Vec::new())
                } else {
                    None
                }
            }
            TreeNode::Internal {
                left,
                right,
                left_len,
                right_len,
            } => {
                if let Some(mut path) = self.path_to_leaf(*left, title) {
                    path.insert(0, (*left, *left_len));
                    return Some(path);
                }
                if let Some(mut path) = self.path_to_leaf(*right, title) {
                    path.insert(0, (*right, *right_len));
                    return Some(path);
                }
                None
            }
        }
    }
}

/// Build a neighbor-joining tree from a pairwise distance matrix
///
/// Ties in the Q criterion resolve to the first pair encountered, so the
/// result is deterministic for a given matrix. Negative branch lengths
/// are clamped to zero. The final two clusters are joined at a root that
/// splits their remaining distance evenly.
pub fn build_nj_tree(matrix: &DistanceMatrix) -> Result<Tree, String> {
    let n = matrix.len();
    if n < 2 {
        return Err("Tree construction requires at least 2 sequences".to_string());
    }

    // Working matrix sized for every node the joins will create
    let max_nodes = 2 * n;
    let mut d = vec![0.0_f64; max_nodes * max_nodes];
    for i in 0..n {
        for j in 0..n {
            d[i * max_nodes + j] = matrix.get(i, j);
        }
    }

    let mut nodes: Vec<TreeNode> = matrix
        .titles()
        .iter()
        .map(|t| TreeNode::Leaf { title: t.clone() })
        .collect();
    let mut active: Vec<usize> = (0..n).collect();

    while active.len() > 2 {
        let r = active.len() as f64;

        // Row sums over active nodes
        let mut row_sums = vec![0.0_f64; max_nodes];
        for &i in &active {
            for &j in &active {
                if i != j {
                    row_sums[i] += d[i * max_nodes + j];
                }
            }
        }

        // Pair minimizing Q; strict < keeps the first pair on ties
        let mut best_q = f64::INFINITY;
        let mut best_pair = (active[0], active[1]);
        for (ai, &i) in active.iter().enumerate() {
            for &j in &active[(ai + 1)..] {
                let q = (r - 2.0) * d[i * max_nodes + j] - row_sums[i] - row_sums[j];
                if q < best_q {
                    best_q = q;
                    best_pair = (i, j);
                }
            }
        }
        let (bi, bj) = best_pair;

        // Branch lengths from the joined pair to the new node
        let dij = d[bi * max_nodes + bj];
        let delta = if r > 2.0 {
            (row_sums[bi] - row_sums[bj]) / (r - 2.0)
        } else {
            0.0
        };
        let li = (0.5 * (dij + delta)).max(0.0);
        let lj = (0.5 * (dij - delta)).max(0.0);

        let new_node = nodes.len();
        nodes.push(TreeNode::Internal {
            left: bi,
            right: bj,
            left_len: li,
            right_len: lj,
        });

        // Distances from the new node to the remaining active nodes
        for &k in &active {
            if k != bi && k != bj {
                let dk = 0.5 * (d[bi * max_nodes + k] + d[bj * max_nodes + k] - dij);
                d[new_node * max_nodes + k] = dk;
                d[k * max_nodes + new_node] = dk;
            }
        }

        active.retain(|&x| x != bi && x != bj);
        active.push(new_node);
    }

    // Root joins the final pair, splitting their distance evenly
    let (fi, fj) = (active[0], active[1]);
    let half = d[fi * max_nodes + fj] / 2.0;
    let root = nodes.len();
    nodes.push(TreeNode::Internal {
        left: fi,
        right: fj,
        left_len: half,
        right_len: half,
    });

    Ok(Tree { nodes, root })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(titles: &[&str], entries: &[(usize, usize, f64)]) -> DistanceMatrix {
        let mut m = DistanceMatrix::new(titles.iter().map(|t| t.to_string()).collect());
        for &(i, j, v) in entries {
            m.set(i, j, v);
        }
        m
    }

    #[test]
    fn test_two_taxon_split() {
        let m = matrix(&["A", "B"], &[(0, 1, 0.4)]);
        let tree = build_nj_tree(&m).unwrap();

        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.newick(), "(A:0.200000,B:0.200000);");
        assert!((tree.path_length("A", "B").unwrap() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_three_taxon_additive() {
        // Star tree with leaf branches 0.1, 0.2, 0.3
        let m = matrix(
            &["A", "B", "C"],
            &[(0, 1, 0.3), (0, 2, 0.4), (1, 2, 0.5)],
        );
        let tree = build_nj_tree(&m).unwrap();

        assert!((tree.path_length("A", "B").unwrap() - 0.3).abs() < 1e-9);
        assert!((tree.path_length("A", "C").unwrap() - 0.4).abs() < 1e-9);
        assert!((tree.path_length("B", "C").unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_four_taxon_additive_reconstruction() {
        // ((A:0.1,B:0.2):0.3 internal:(C:0.15,D:0.25))
        let m = matrix(
            &["A", "B", "C", "D"],
            &[
                (0, 1, 0.3),
                (0, 2, 0.55),
                (0, 3, 0.65),
                (1, 2, 0.65),
                (1, 3, 0.75),
                (2, 3, 0.4),
            ],
        );
        let tree = build_nj_tree(&m).unwrap();

        for (a, b, expected) in [
            ("A", "B", 0.3),
            ("A", "C", 0.55),
            ("A", "D", 0.65),
            ("B", "C", 0.65),
            ("B", "D", 0.75),
            ("C", "D", 0.4),
        ] {
            let got = tree.path_length(a, b).unwrap();
            assert!(
                (got - expected).abs() < 1e-9,
                "path {}-{}: got {}, expected {}",
                a,
                b,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_tie_joins_first_pair() {
        // All distances equal: ties resolve to the first pair (A, B), and
        // the surviving leaf C ends up as the root's first child
        let m = matrix(
            &["A", "B", "C"],
            &[(0, 1, 0.5), (0, 2, 0.5), (1, 2, 0.5)],
        );
        let tree = build_nj_tree(&m).unwrap();
        assert_eq!(tree.newick(), "(C:0.125000,(A:0.250000,B:0.250000):0.125000);");
    }

    #[test]
    fn test_branch_lengths_nonnegative() {
        let m = matrix(
            &["A", "B", "C"],
            &[(0, 1, 0.1), (0, 2, 0.5), (1, 2, 0.5)],
        );
        let tree = build_nj_tree(&m).unwrap();

        for idx in 0..=tree.root() {
            if let TreeNode::Internal {
                left_len,
                right_len,
                ..
            } = tree.node(idx)
            {
                assert!(*left_len >= 0.0);
                assert!(*right_len >= 0.0);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let m = matrix(
            &["A", "B", "C", "D"],
            &[
                (0, 1, 0.3),
                (0, 2, 0.5),
                (0, 3, 0.6),
                (1, 2, 0.6),
                (1, 3, 0.5),
                (2, 3, 0.3),
            ],
        );
        let t1 = build_nj_tree(&m).unwrap();
        let t2 = build_nj_tree(&m).unwrap();
        assert_eq!(t1.newick(), t2.newick());
    }

    #[test]
    fn test_newick_shape() {
        let m = matrix(
            &["S1", "S2", "S3"],
            &[(0, 1, 0.2), (0, 2, 0.4), (1, 2, 0.4)],
        );
        let newick = build_nj_tree(&m).unwrap().newick();

        assert!(newick.ends_with(");"));
        assert_eq!(
            newick.matches('(').count(),
            newick.matches(')').count()
        );
        for title in ["S1", "S2", "S3"] {
            assert!(newick.contains(title));
        }
    }

    #[test]
    fn test_leaf_titles_cover_inputs_exactly() {
        let m = matrix(
            &["A", "B", "C"],
            &[(0, 1, 0.2), (0, 2, 0.8), (1, 2, 0.8)],
        );
        let tree = build_nj_tree(&m).unwrap();
        let mut titles = tree.leaf_titles();
        titles.sort_unstable();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_path_to_self_is_zero() {
        let m = matrix(&["A", "B"], &[(0, 1, 0.4)]);
        let tree = build_nj_tree(&m).unwrap();
        assert_eq!(tree.path_length("A", "A"), Some(0.0));
        assert_eq!(tree.path_length("A", "missing"), None);
    }

    #[test]
    fn test_too_few_sequences() {
        let m = DistanceMatrix::new(vec!["only".to_string()]);
        assert!(build_nj_tree(&m).is_err());
        assert!(build_nj_tree(&DistanceMatrix::new(Vec::new())).is_err());
    }
}
