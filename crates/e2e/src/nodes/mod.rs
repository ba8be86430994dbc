pub mod local_node;
