use crate::domain::a001_product::ui::details::ProductStockDetails;
use crate::domain::a001_product::ui::list::ProductListPage;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Centralized modal stack for the whole console
    provide_context(ModalStackService::new());

    // Навигация без роутера: список товаров → карточка остатков
    let (opened_product, set_opened_product) = signal(None::<String>);

    view! {
        <div class="app">
            {move || match opened_product.get() {
                Some(product_id) => view! {
                    <ProductStockDetails
                        product_id=product_id
                        on_close=Callback::new(move |_| set_opened_product.set(None))
                    />
                }
                .into_any(),
                None => view! {
                    <ProductListPage on_open=Callback::new(move |id: String| {
                        set_opened_product.set(Some(id))
                    }) />
                }
                .into_any(),
            }}
            <ModalHost />
        </div>
    }
}
