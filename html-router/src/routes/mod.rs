pub mod photosearch;
