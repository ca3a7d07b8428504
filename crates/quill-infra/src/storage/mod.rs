//! Object storage implementations.

mod memory;

#[cfg(feature = "storage")]
mod supabase;

pub use memory::InMemoryObjectStore;

#[cfg(feature = "storage")]
pub use supabase::{SupabaseStorage, SupabaseStorageConfig};
