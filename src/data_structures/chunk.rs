use std::ops::Range;

/// A fixed-size block of raw attribute bytes.
///
/// A chunk is split into equally sized slots of `stride` bytes, one per entity.
/// Freshly allocated chunks are zeroed; slots that get reused keep whatever bytes they held before.
pub struct Chunk {
	bytes: Box<[u8]>,
}

impl Chunk {
	pub fn new(size: usize) -> Self {
		Self {
			bytes: vec![0; size].into_boxed_slice(),
		}
	}

	/// Size of the chunk in bytes.
	pub fn size(&self) -> usize {
		self.bytes.len()
	}

	/// The bytes of `range`, relative to the start of the chunk.
	///
	/// # Panics
	/// Panics if `range` lies outside the chunk.
	#[inline(always)]
	pub fn bytes(&self, range: Range<usize>) -> &[u8] {
		&self.bytes[range]
	}

	/// The bytes of `range`, relative to the start of the chunk.
	///
	/// # Panics
	/// Panics if `range` lies outside the chunk.
	#[inline(always)]
	pub fn bytes_mut(&mut self, range: Range<usize>) -> &mut [u8] {
		&mut self.bytes[range]
	}

	/// Copy `len` bytes starting at `src` to `dst` within the same chunk.
	pub fn copy_within(&mut self, src: usize, dst: usize, len: usize) {
		self.bytes.copy_within(src..src + len, dst);
	}
}

/// Copy a slot of `len` bytes between two different chunks of the same list.
///
/// `src` and `dst` are `(chunk index, byte offset)` pairs.
pub fn copy_between(chunks: &mut [Chunk], src: (usize, usize), dst: (usize, usize), len: usize) {
	let (src_chunk, src_offset) = src;
	let (dst_chunk, dst_offset) = dst;
	debug_assert_ne!(src_chunk, dst_chunk);

	if src_chunk < dst_chunk {
		let (head, tail) = chunks.split_at_mut(dst_chunk);
		let from = head[src_chunk].bytes(src_offset..src_offset + len);
		tail[0].bytes_mut(dst_offset..dst_offset + len).copy_from_slice(from);
	} else {
		let (head, tail) = chunks.split_at_mut(src_chunk);
		let from = tail[0].bytes(src_offset..src_offset + len);
		head[dst_chunk].bytes_mut(dst_offset..dst_offset + len).copy_from_slice(from);
	}
}
