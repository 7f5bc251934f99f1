use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct ProductListState {
    // filters
    pub q: String,

    // pagination
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,

    // load flag
    pub is_loaded: bool,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            q: String::new(),
            page: 1,
            page_size: 50,
            total_count: 0,
            total_pages: 0,
            is_loaded: false,
        }
    }
}

// Create state within component scope instead of thread-local
// This ensures state is properly disposed when component unmounts
pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState::default())
}
