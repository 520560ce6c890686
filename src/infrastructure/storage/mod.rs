pub mod contacts_file;
pub mod contacts_memory;
