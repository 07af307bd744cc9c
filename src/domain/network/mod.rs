pub mod edge_source;
pub mod road_network;
pub mod router;
