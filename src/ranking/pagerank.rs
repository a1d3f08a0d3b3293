use log::{info, warn};
use ndarray::Array1;

/// Power-iteration parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankSettings {
    pub damping_factor: f64,
    pub max_iterations: usize,
    pub convergence_tolerance: f64,
}

#[derive(Debug, Clone)]
pub struct PageRankOutcome {
    pub scores: Array1<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// Weighted PageRank by power iteration.
///
/// `out_edges[i]` lists `(target, weight)` pairs leaving node `i`. Each
/// source spreads its mass in proportion to edge weight over its total
/// outgoing weight. Teleportation is uniform and the mass of dangling nodes
/// (no outgoing weight) is spread uniformly too:
///
/// ```text
/// x'[v] = (1 - d) / N + d * Σ x[u] * w(u, v) / out(u) + d * dangling / N
/// ```
///
/// Stops once the L1 change drops below `N * tolerance`. Running out of
/// iterations is not an error: the last iterate is returned.
pub fn pagerank(out_edges: &[Vec<(usize, f64)>], settings: &PageRankSettings) -> PageRankOutcome {
    let n = out_edges.len();
    if n == 0 {
        return PageRankOutcome {
            scores: Array1::zeros(0),
            iterations: 0,
            converged: true,
        };
    }

    let out_weights = calculate_out_weights(out_edges);
    let dangling = find_dangling_nodes(&out_weights);
    let mut scores = Array1::from_elem(n, 1.0 / n as f64);

    for iteration in 0..settings.max_iterations {
        let next = compute_iteration(&scores, out_edges, &out_weights, &dangling, settings);
        let change = l1_distance(&next, &scores);
        scores = next;

        if change < n as f64 * settings.convergence_tolerance {
            info!("PageRank converged in {} iterations", iteration + 1);
            return PageRankOutcome {
                scores,
                iterations: iteration + 1,
                converged: true,
            };
        }
    }

    warn!(
        "PageRank did not converge within {} iterations, returning last estimate",
        settings.max_iterations
    );
    PageRankOutcome {
        scores,
        iterations: settings.max_iterations,
        converged: false,
    }
}

fn calculate_out_weights(out_edges: &[Vec<(usize, f64)>]) -> Array1<f64> {
    out_edges
        .iter()
        .map(|edges| edges.iter().map(|&(_, w)| w).sum::<f64>())
        .collect()
}

fn find_dangling_nodes(out_weights: &Array1<f64>) -> Vec<usize> {
    out_weights
        .iter()
        .enumerate()
        .filter(|&(_, &w)| w <= 0.0)
        .map(|(idx, _)| idx)
        .collect()
}

fn compute_iteration(
    scores: &Array1<f64>,
    out_edges: &[Vec<(usize, f64)>],
    out_weights: &Array1<f64>,
    dangling: &[usize],
    settings: &PageRankSettings,
) -> Array1<f64> {
    let n = scores.len() as f64;
    let alpha = settings.damping_factor;
    let mut next = Array1::<f64>::zeros(scores.len());

    for (source, edges) in out_edges.iter().enumerate() {
        let total = out_weights[source];
        if total <= 0.0 {
            continue;
        }
        for &(target, weight) in edges {
            next[target] += alpha * scores[source] * weight / total;
        }
    }

    let dangling_mass: f64 = dangling.iter().map(|&idx| scores[idx]).sum();
    let base = (1.0 - alpha) / n + alpha * dangling_mass / n;
    next.mapv_inplace(|x| x + base);

    next
}

fn l1_distance(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    (a - b).mapv(f64::abs).sum()
}
