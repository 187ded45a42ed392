pub mod itinerary_repair_service;
pub mod openai_service;
pub mod prompt_service;
pub mod trip_service;
