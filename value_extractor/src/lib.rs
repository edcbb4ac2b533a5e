pub mod value_extractor;
