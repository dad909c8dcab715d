use proc_macro2::Span;
use quote::ToTokens;
use syn::{Ident, Type};

use super::{EqChoice, FormatChoice, ParseChoice};

/// Types whose size is known without asking the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    Bool,
    Char,
    F32,
    F64,
}

impl PrimitiveType {
    pub fn from_ident(ident: &Ident) -> Option<Self> {
        let out = match ident.to_string().as_str() {
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "bool" => Self::Bool,
            "char" => Self::Char,
            "f32" => Self::F32,
            "f64" => Self::F64,
            _ => return None,
        };
        Some(out)
    }

    pub fn size(self) -> usize {
        match self {
            Self::U8 | Self::I8 | Self::Bool => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::Char | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
            Self::U128 | Self::I128 => 16,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128
        )
    }
}

/// Heap owning types a payload can never be.
const MANAGED_TYPES: [&str; 12] = [
    "String", "str", "Vec", "VecDeque", "Box", "Rc", "Arc", "Cow", "HashMap", "HashSet", "BTreeMap",
    "BTreeSet",
];

/// Syntactic shape of a kind's payload type.
#[derive(Debug, Clone)]
pub enum PayloadShape {
    Primitive(PrimitiveType),
    Unit,
    Array {
        element: Box<PayloadShape>,
        length: usize,
    },
    Tuple(Vec<PayloadShape>),
    /// `Option<T>`, stored as `T` followed by a one byte has-value flag.
    Nullable(Box<PayloadShape>),
    /// Any other named type. The size has to be provided with `#[kind(size = N)]`.
    Named,
}

impl PayloadShape {
    /// Classifies `ty`, rejecting anything that is not a fixed size value.
    pub fn parse(ty: &Type) -> syn::Result<Self> {
        match ty {
            Type::Paren(inner) => Self::parse(&inner.elem),
            Type::Group(inner) => Self::parse(&inner.elem),
            Type::Tuple(tuple) => {
                if tuple.elems.is_empty() {
                    return Ok(Self::Unit);
                }
                let elements = tuple
                    .elems
                    .iter()
                    .map(Self::parse)
                    .collect::<syn::Result<Vec<_>>>()?;
                Ok(Self::Tuple(elements))
            }
            Type::Array(array) => {
                let element = Self::parse(&array.elem)?;
                let length = match &array.len {
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Int(int),
                        ..
                    }) => int.base10_parse::<usize>()?,
                    _ => {
                        return Err(syn::Error::new_spanned(
                            &array.len,
                            "array payloads need a literal length",
                        ))
                    }
                };
                Ok(Self::Array {
                    element: Box::new(element),
                    length,
                })
            }
            Type::Path(path) => {
                if path.qself.is_some() {
                    return Ok(Self::Named);
                }
                let Some(last) = path.path.segments.last() else {
                    return Ok(Self::Named);
                };
                let name = last.ident.to_string();
                if MANAGED_TYPES.contains(&name.as_str()) {
                    return Err(syn::Error::new_spanned(
                        ty,
                        format!("`{name}` owns memory elsewhere, payloads must be fixed size value types"),
                    ));
                }
                if path.path.segments.len() == 1 {
                    if let Some(prim) = PrimitiveType::from_ident(&last.ident) {
                        return Ok(Self::Primitive(prim));
                    }
                }
                if name == "Option" {
                    if let syn::PathArguments::AngleBracketed(args) = &last.arguments {
                        if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                            let inner = Self::parse(inner)?;
                            if matches!(inner, Self::Nullable(_)) {
                                return Err(syn::Error::new_spanned(
                                    ty,
                                    "nested `Option` payloads are not supported",
                                ));
                            }
                            return Ok(Self::Nullable(Box::new(inner)));
                        }
                    }
                }
                Ok(Self::Named)
            }
            Type::Reference(_) | Type::Ptr(_) | Type::Slice(_) => Err(syn::Error::new_spanned(
                ty,
                "references, pointers and slices can not be payloads, payloads must be fixed size value types",
            )),
            _ => Err(syn::Error::new_spanned(
                ty,
                "unsupported payload type, payloads must be fixed size value types",
            )),
        }
    }

    /// Size in bytes when it can be known from the type's spelling alone.
    pub fn natural_size(&self) -> Option<usize> {
        match self {
            Self::Primitive(prim) => Some(prim.size()),
            Self::Unit => Some(0),
            Self::Array { element, length } => element.natural_size().map(|size| size * length),
            Self::Tuple(elements) => elements
                .iter()
                .map(Self::natural_size)
                .sum::<Option<usize>>(),
            Self::Nullable(inner) => inner.natural_size().map(|size| size + 1),
            Self::Named => None,
        }
    }

    pub fn is_signed(&self) -> bool {
        match self {
            Self::Primitive(prim) => prim.is_signed(),
            Self::Nullable(inner) => inner.is_signed(),
            _ => false,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// The shape with one level of nullability removed.
    pub fn value_shape(&self) -> &Self {
        match self {
            Self::Nullable(inner) => inner,
            other => other,
        }
    }
}

/// Capability overrides a kind declared with `#[kind(...)]`.
#[derive(Debug, Clone, Default)]
pub struct CapabilityHints {
    pub parse: Option<ParseChoice>,
    pub parse_with: Option<syn::Path>,
    pub format: Option<FormatChoice>,
    pub format_with: Option<syn::Path>,
    pub eq: Option<EqChoice>,
    pub eq_with: Option<syn::Path>,
    pub enumeration: bool,
    pub nested: bool,
}

/// Everything collected about one kind.
#[derive(Debug, Clone)]
pub struct KindVariant {
    /// Kind name, after optional suffix stripping. Also the name of the generated kind enum member.
    pub name: Ident,
    pub display_name: Option<String>,
    /// Original variant name, used for diagnostics.
    pub variant: Ident,
    pub payload: Type,
    pub shape: PayloadShape,
    /// Natural size of the payload in bytes.
    pub payload_size: usize,
    /// Set when the size came from `#[kind(size = N)]` and must be checked by the compiler.
    pub declared_size: Option<usize>,
    pub declared_order: u64,
    pub signed: bool,
    pub hints: CapabilityHints,
    /// Declaration position.
    pub position: usize,
}

impl KindVariant {
    pub fn span(&self) -> Span {
        self.variant.span()
    }

    pub fn name_text(&self) -> String {
        self.name.to_string()
    }

    pub fn display_text(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| self.name.to_string())
    }

    /// Used to detect kinds that share a payload type.
    pub fn payload_key(&self) -> String {
        self.payload.to_token_stream().to_string()
    }
}
