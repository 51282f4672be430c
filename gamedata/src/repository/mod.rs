// Repository trait and the storage back ends implementing it.
pub mod table_repository;

pub(crate) mod csv_table_repo;
pub(crate) mod memory_table_repo;

// Storage selection and the in-memory set of loaded tables.
pub mod database;
pub mod database_manager;

pub use csv_table_repo::CsvTableRepository;
pub use memory_table_repo::MemoryTableRepository;
pub use table_repository::TableRepository;
