//! Proptest strategies for [`TwoKeyMap`].

use crate::{support::comparer::KeyComparer, TwoKeyMap};
use proptest::{
    arbitrary::{any_with, Arbitrary},
    collection::{vec, SizeRange},
    strategy::{BoxedStrategy, Strategy},
};

/// Parameters for generating an arbitrary [`TwoKeyMap`].
///
/// `size` bounds the number of generated triples before duplicate keys are
/// collapsed, so the resulting map may be smaller.
#[derive(Clone, Debug)]
pub struct TwoKeyMapParams<PA, PB, PV> {
    /// The number of triples to generate.
    pub size: SizeRange,
    /// Parameters for A-keys.
    pub key_a: PA,
    /// Parameters for B-keys.
    pub key_b: PB,
    /// Parameters for values.
    pub value: PV,
}

impl<PA: Default, PB: Default, PV: Default> Default
    for TwoKeyMapParams<PA, PB, PV>
{
    fn default() -> Self {
        Self {
            size: (0..16).into(),
            key_a: PA::default(),
            key_b: PB::default(),
            value: PV::default(),
        }
    }
}

/// Generates maps by collecting arbitrary triples. Later triples overwrite
/// earlier ones that share either key, as with
/// [`TwoKeyMap::insert_overwrite`].
impl<A, B, V, CA, CB> Arbitrary for TwoKeyMap<A, B, V, CA, CB>
where
    A: Arbitrary + 'static,
    B: Arbitrary + 'static,
    V: Arbitrary + 'static,
    CA: Default + KeyComparer<A> + 'static,
    CB: Default + KeyComparer<B> + 'static,
{
    type Parameters = TwoKeyMapParams<A::Parameters, B::Parameters, V::Parameters>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let triple = (
            any_with::<A>(params.key_a),
            any_with::<B>(params.key_b),
            any_with::<V>(params.value),
        );
        vec(triple, params.size)
            .prop_map(|triples| triples.into_iter().collect())
            .boxed()
    }
}
