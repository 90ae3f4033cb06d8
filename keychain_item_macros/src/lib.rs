mod attribute_set;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(AttributeSet)]
// ============================================================================

/// Derive macro that implements `keychain_item::AttributeSet` from field
/// annotations.
///
/// # Usage
///
/// ```ignore
/// #[derive(AttributeSet)]
/// pub struct TokenAttributes {
///     #[element(flatten)]
///     pub common: CommonAttributes,
///     #[element]
///     pub service: AttributeElement<String>,
///     // not part of any query
///     pub note: String,
/// }
/// ```
///
/// - `#[element]`: the field is a single slot implementing `Element`
/// - `#[element(flatten)]`: the field is itself an `AttributeSet`; its
///   elements are spliced in at this position
///
/// Elements are reported in field declaration order, which is the order
/// constraint resolution walks them (first-seen wins on duplicate keys).
#[proc_macro_derive(AttributeSet, attributes(element))]
pub fn derive_attribute_set(input: TokenStream) -> TokenStream {
    attribute_set::derive_attribute_set(input)
}
