//! Registration macros for miniunit test suites.
//!
//! - `suite`: turns an inherent `impl` block into a `miniunit::TestSuite`, registering every method marked with
//!   `#[unit_test(...)]` (in source order) together with its declared expectations.
//!
//! No runtime reflection is involved: the macro writes the registration table out as plain code.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{Attribute, Error, Expr, ImplItem, ImplItemFn, ItemImpl, LitBool, LitStr, Meta, Type};

const TEST_ATTR: &str = "unit_test";

/// Registers the `#[unit_test]` methods of an impl block as a test suite.
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct MathTests {
///     counter: i32,
/// }
///
/// #[miniunit::suite]
/// impl MathTests {
///     #[unit_test(name = "adds numbers")]
///     fn add(&mut self) -> TestResult {
///         are_equal(4, 2 + 2)?;
///         Ok(())
///     }
///
///     #[unit_test(expected_error = std::num::ParseIntError)]
///     fn parse(&mut self) -> TestResult {
///         "x".parse::<i32>()?;
///         Ok(())
///     }
///
///     #[unit_test(should_fail)]
///     fn broken(&mut self) -> TestResult {
///         fail("always")?;
///         Ok(())
///     }
/// }
///
/// // Generates:
/// impl miniunit::TestSuite for MathTests {
///     fn registrations() -> Vec<miniunit::TestRegistration<Self>> { vec![ /* add, parse, broken */ ] }
/// }
/// ```
///
/// Accepted `unit_test` keys: `name = "..."`, `expected_error = Type`, `expected_kind = <ErrorKind expr>`,
/// `should_fail` / `should_fail = bool`.
#[proc_macro_attribute]
pub fn suite(attr: TokenStream, item: TokenStream) -> TokenStream {
    match expand_suite(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed arguments of one `#[unit_test(...)]` attribute.
#[derive(Default)]
struct TestArgs {
    name: Option<LitStr>,
    expected_error: Option<Type>,
    expected_kind: Option<Expr>,
    should_fail: bool,
}

fn expand_suite(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    if !attr.is_empty() {
        return Err(Error::new(attr.span(), "`#[suite]` takes no arguments"));
    }

    let mut item_impl: ItemImpl = syn::parse2(item)?;
    if let Some((_, path, _)) = &item_impl.trait_ {
        return Err(Error::new(
            path.span(),
            "`#[suite]` must be placed on an inherent impl block, not a trait impl",
        ));
    }

    let mut registrations = Vec::new();
    for impl_item in &mut item_impl.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let Some(args) = take_test_args(method)? else {
            continue;
        };
        check_signature(method)?;
        registrations.push(registration(method, &args));
    }

    let self_ty = &item_impl.self_ty;
    let (impl_generics, _, where_clause) = item_impl.generics.split_for_impl();

    Ok(quote! {
        #item_impl

        impl #impl_generics ::miniunit::TestSuite for #self_ty #where_clause {
            fn registrations() -> ::std::vec::Vec<::miniunit::TestRegistration<Self>> {
                ::std::vec![#(#registrations),*]
            }
        }
    })
}

/// Strip the `#[unit_test]` attribute off a method and parse it. `None` if the method is not a test.
fn take_test_args(method: &mut ImplItemFn) -> syn::Result<Option<TestArgs>> {
    let (test_attrs, other_attrs): (Vec<Attribute>, Vec<Attribute>) = method
        .attrs
        .drain(..)
        .partition(|attr| attr.path().is_ident(TEST_ATTR));
    method.attrs = other_attrs;

    match test_attrs.as_slice() {
        [] => Ok(None),
        [attr] => parse_test_args(attr).map(Some),
        [_, duplicate, ..] => Err(Error::new(
            duplicate.span(),
            "a test method carries exactly one `#[unit_test]` attribute",
        )),
    }
}

fn parse_test_args(attr: &Attribute) -> syn::Result<TestArgs> {
    let mut args = TestArgs::default();
    if !matches!(attr.meta, Meta::List(_)) {
        return Ok(args);
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            args.name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("expected_error") {
            args.expected_error = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("expected_kind") {
            args.expected_kind = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("should_fail") {
            args.should_fail = if meta.input.peek(syn::Token![=]) {
                meta.value()?.parse::<LitBool>()?.value
            } else {
                true
            };
        } else {
            return Err(meta.error("unknown `unit_test` key; expected `name`, `expected_error`, `expected_kind` or `should_fail`"));
        }
        Ok(())
    })?;

    if let (Some(_), Some(kind)) = (&args.expected_error, &args.expected_kind) {
        return Err(Error::new(
            kind.span(),
            "`expected_error` and `expected_kind` are mutually exclusive",
        ));
    }
    Ok(args)
}

fn check_signature(method: &ImplItemFn) -> syn::Result<()> {
    let sig = &method.sig;
    match sig.receiver() {
        Some(receiver) if receiver.reference.is_some() => {}
        Some(receiver) => {
            return Err(Error::new(
                receiver.span(),
                "test methods borrow the suite: use `&self` or `&mut self`",
            ));
        }
        None => {
            return Err(Error::new(
                sig.ident.span(),
                "test methods must take `&self` or `&mut self`; associated functions cannot be tests",
            ));
        }
    }
    if sig.inputs.len() != 1 {
        return Err(Error::new(sig.inputs.span(), "test methods take no arguments besides `self`"));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new(asyncness.span(), "test methods cannot be async"));
    }
    if !sig.generics.params.is_empty() {
        return Err(Error::new(sig.generics.span(), "test methods cannot be generic"));
    }
    Ok(())
}

fn registration(method: &ImplItemFn, args: &TestArgs) -> TokenStream2 {
    let ident = &method.sig.ident;
    let method_name = ident.to_string();
    let span = ident.span();

    let mut declaration = quote! { ::miniunit::TestDeclaration::new() };
    if let Some(name) = &args.name {
        declaration = quote! { #declaration.named(#name) };
    }
    if let Some(ty) = &args.expected_error {
        declaration = quote! { #declaration.expect_error::<#ty>() };
    }
    if let Some(kind) = &args.expected_kind {
        declaration = quote! { #declaration.expect_kind(#kind) };
    }
    if args.should_fail {
        declaration = quote! { #declaration.should_fail() };
    }

    quote_spanned! {span=>
        ::miniunit::TestRegistration::new(
            #method_name,
            #declaration,
            |suite: &mut Self| ::miniunit::IntoTestResult::into_test_result(suite.#ident()),
        )
    }
}
