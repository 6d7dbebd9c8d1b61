pub mod generated_identifiers;
pub mod id_generation_config;
pub mod id_sequences;
