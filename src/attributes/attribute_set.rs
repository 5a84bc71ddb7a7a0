use crate::attributes::{Attribute, AttributeRegistry};
use crate::data_structures::Signature;
use crate::error::EcsResult;

/// A set of [Attribute] types, written as a tuple, that can be turned into a [Signature].
///
/// ```ignore
/// let signature = ecs.signature_of::<(Position, Velocity)>()?;
/// ```
pub trait AttributeSet {
	/// Build the [Signature] of the set.
	/// Fails if one of the types was never registered.
	fn signature(registry: &AttributeRegistry) -> EcsResult<Signature>;
}

impl AttributeSet for () {
	fn signature(_: &AttributeRegistry) -> EcsResult<Signature> {
		Ok(Signature::new())
	}
}

macro_rules! impl_attribute_set {
    ($($t: ident),*) => {
        impl<$($t: Attribute),*> AttributeSet for ($($t,)*) {
            fn signature(registry: &AttributeRegistry) -> EcsResult<Signature> {
                let mut signature = Signature::new();
                $(signature.set(usize::from(registry.require::<$t>()?), true);)*
                Ok(signature)
            }
        }
    };
}

impl_attribute_set!(T0);
impl_attribute_set!(T0, T1);
impl_attribute_set!(T0, T1, T2);
impl_attribute_set!(T0, T1, T2, T3);
impl_attribute_set!(T0, T1, T2, T3, T4);
impl_attribute_set!(T0, T1, T2, T3, T4, T5);
impl_attribute_set!(T0, T1, T2, T3, T4, T5, T6);
impl_attribute_set!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_attribute_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_attribute_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_attribute_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_attribute_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
