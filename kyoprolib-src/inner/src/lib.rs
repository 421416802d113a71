/// Re-exports each leaf crate both as a module and as a glob, so that
/// `ds::OrderedTree` and `ds::ordered_tree::OrderedTree` both resolve and
/// rustdoc shows the leaf items inline.
#[macro_export]
macro_rules! doc_inline_reexport {
    ( $($lib:ident,)* ) => { $(
        #[doc(inline)]
        pub use $lib::{self, *};
    )* };
}
