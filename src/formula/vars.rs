//! The fixed graph-topology regressor catalog.
//!
//! This order is load-bearing: the normalizer rescales these columns in this
//! order, and the table exporter lists them in this order. Any change here
//! changes every exported table.

/// Graph-topology variables appended to every regression formula.
pub const GRAPH_VARS: [&str; 12] = [
    "team_graph_centrality_degree_mean",
    "team_graph_centrality_degree_stdev",
    "team_graph_centrality_eigenvector_mean",
    "team_graph_centrality_eigenvector_stdev",
    "team_graph_centrality_betweenness_mean",
    "team_graph_centrality_betweenness_stdev",
    "team_graph_nearest_neighbor_degree_mean",
    "team_graph_nearest_neighbor_degree_stdev",
    "team_graph_clustering",
    "team_graph_assortativity",
    "team_graph_pathlength",
    "team_graph_diameter",
];
