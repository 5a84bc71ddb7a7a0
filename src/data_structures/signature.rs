use std::hash::{Hash, Hasher};
use std::cmp::Ordering;
use std::fmt;

const BITS: usize = 64;

/// A dynamically sized bit-field identifying a set of [attribute types](crate::attributes::AttributeType).
///
/// Bit `i` is set when the entity or archetype carries attribute type `i`.
/// Trailing zero words are ignored by comparisons and hashing,
/// so two signatures with the same set bits are always equal regardless of their capacity.
#[derive(Default, Clone)]
pub struct Signature {
	values: Vec<u64>,
}

impl Signature {
	/// The signature with no bits set.
	pub const EMPTY: Signature = Signature { values: Vec::new() };

	/// Create a new, empty [Signature].
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new [Signature] with room for at least `capacity` bits.
	pub fn with_capacity(capacity: usize) -> Self {
		let mut instance = Self::new();
		instance.ensure_capacity(capacity);
		instance
	}

	/// Get the value of the bit at index `i`.
	#[inline(always)]
	pub fn get(&self, i: usize) -> bool {
		let (position, shift) = Self::pos_shift(i);
		match self.values.get(position) {
			Some(word) => word & (1 << shift) != 0,
			None => false,
		}
	}

	/// Set the value of the bit at index `i`, growing the field if needed.
	#[inline(always)]
	pub fn set(&mut self, i: usize, value: bool) {
		let (position, shift) = Self::pos_shift(i);
		if value {
			if self.values.len() <= position {
				self.values.resize(position + 1, 0);
			}
			self.values[position] |= 1 << shift;
		} else if let Some(word) = self.values.get_mut(position) {
			*word &= !(1 << shift);
		}
	}

	/// Builder-style [set](Self::set).
	pub fn with(mut self, i: usize) -> Self {
		self.set(i, true);
		self
	}

	/// Builder-style clear.
	pub fn without(mut self, i: usize) -> Self {
		self.set(i, false);
		self
	}

	/// Check if every bit set in `self` is also set in `other`.
	pub fn is_subset_of(&self, other: &Signature) -> bool {
		self.values.iter().enumerate().all(|(i, mask)| {
			let bits = other.values.get(i).copied().unwrap_or(0);
			bits & mask == *mask
		})
	}

	/// Check if every bit set in `other` is also set in `self`.
	#[inline(always)]
	pub fn is_superset_of(&self, other: &Signature) -> bool {
		other.is_subset_of(self)
	}

	/// Returns the bits set in both signatures.
	pub fn intersection(&self, other: &Signature) -> Signature {
		let values = self.values.iter().zip(other.values.iter()).map(|(a, b)| a & b).collect();
		Signature { values }
	}

	/// Set all bits to 0.
	pub fn clear(&mut self) {
		self.values.fill(0);
	}

	pub fn is_empty(&self) -> bool {
		self.values.iter().all(|word| *word == 0)
	}

	/// Number of set bits.
	pub fn count(&self) -> usize {
		self.values.iter().map(|word| word.count_ones() as usize).sum()
	}

	/// Make sure at least `capacity` bits can be stored without reallocating.
	pub fn ensure_capacity(&mut self, capacity: usize) {
		let words = (capacity + BITS - 1) / BITS;
		if self.values.len() < words {
			self.values.resize(words, 0);
		}
	}

	/// Get the [Signature]'s capacity in bits.
	pub fn capacity(&self) -> usize {
		self.values.len() * BITS
	}

	/// Iterate over the indices of set bits, in ascending order.
	pub fn iter_ones(&self) -> SignatureIterator {
		SignatureIterator {
			index: 0,
			current: self.values.first().copied().unwrap_or(0),
			values: &self.values,
		}
	}

	/// Index one past the highest set bit, or 0 if no bit is set.
	fn significant_len(&self) -> usize {
		self.values.iter().rposition(|word| *word != 0).map_or(0, |i| i + 1)
	}

	#[inline(always)]
	fn pos_shift(i: usize) -> (usize, usize) {
		(i / BITS, i % BITS)
	}
}

impl From<&[usize]> for Signature {
	fn from(bits: &[usize]) -> Self {
		let mut signature = Signature::new();
		for bit in bits {
			signature.set(*bit, true);
		}
		signature
	}
}

impl Eq for Signature {}

impl PartialEq<Self> for Signature {
	fn eq(&self, other: &Self) -> bool {
		let (shorter, longer) = match self.values.len().cmp(&other.values.len()) {
			Ordering::Greater => (&other.values, &self.values),
			_ => (&self.values, &other.values),
		};

		shorter.as_slice() == &longer[..shorter.len()] && longer[shorter.len()..].iter().all(|i| *i == 0)
	}
}

impl Hash for Signature {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.values[..self.significant_len()].hash(state);
	}
}

impl fmt::Debug for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter_ones()).finish()
	}
}

/// Iterates over the set bits of a [Signature].
pub struct SignatureIterator<'l> {
	index: usize,
	current: u64,
	values: &'l [u64],
}

impl Iterator for SignatureIterator<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		while self.current == 0 {
			self.index += 1;
			self.current = *self.values.get(self.index)?;
		}

		let bit = self.current.trailing_zeros() as usize;
		self.current &= self.current - 1;
		Some(self.index * BITS + bit)
	}
}
