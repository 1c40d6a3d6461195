// Service exports
pub mod catalog;
pub mod postgres;
pub mod repository;
pub mod stylist;
pub mod suggestions;

pub use postgres::PostgresClient;
pub use repository::{GarmentRepository, RepositoryError};
pub use stylist::{StylistClient, StylistError, StylistSuggestion};
pub use suggestions::{build_provider, GenerativeSuggestions, StaticSuggestions, SuggestionProvider, MAX_SUGGESTIONS};
