pub mod resource_pool;
