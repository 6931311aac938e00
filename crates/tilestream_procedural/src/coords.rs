//! # Chunk Addressing
//!
//! Chunk coordinates, their packed 64-bit keys, and floor division helpers
//! for mapping world tiles onto chunks.
//!
//! Plain `/` and `%` truncate toward zero, which puts tile `-1` in chunk `0`.
//! Everything here rounds toward negative infinity instead, so tile `-1`
//! lands in chunk `-1` at local offset `size - 1`.

/// Floor division: the quotient rounded toward negative infinity.
///
/// `b` must be non-zero, and `(i32::MIN, -1)` overflows like `/` does.
#[inline]
#[must_use]
pub const fn floor_div(a: i32, b: i32) -> i32 {
    let q = a / b;
    let r = a % b;
    if r != 0 && ((r > 0) != (b > 0)) {
        q - 1
    } else {
        q
    }
}

/// Floor modulo: the remainder matching [`floor_div`].
///
/// Satisfies `floor_div(a, b) * b + floor_mod(a, b) == a`, and for `b > 0`
/// the result is always in `[0, b)`.
#[inline]
#[must_use]
pub const fn floor_mod(a: i32, b: i32) -> i32 {
    let r = a % b;
    if r != 0 && ((r > 0) != (b > 0)) {
        r + b
    } else {
        r
    }
}

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not tiles).
    pub x: i32,
    /// Y coordinate (in chunks, not tiles).
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the chunk containing world tile `(world_x, world_y)`.
    #[inline]
    #[must_use]
    pub const fn from_world(world_x: i32, world_y: i32, chunk_size: u32) -> Self {
        let size = chunk_size as i32;
        Self::new(floor_div(world_x, size), floor_div(world_y, size))
    }

    /// Returns the offset of world tile `(world_x, world_y)` inside its chunk.
    #[inline]
    #[must_use]
    pub const fn local_offset(world_x: i32, world_y: i32, chunk_size: u32) -> (u32, u32) {
        let size = chunk_size as i32;
        (
            floor_mod(world_x, size) as u32,
            floor_mod(world_y, size) as u32,
        )
    }

    /// World X of the chunk's origin tile.
    ///
    /// 64-bit because `x * chunk_size` leaves `i32` range near the edges.
    #[inline]
    #[must_use]
    pub const fn origin_x(self, chunk_size: u32) -> i64 {
        self.x as i64 * chunk_size as i64
    }

    /// World Y of the chunk's origin tile.
    #[inline]
    #[must_use]
    pub const fn origin_y(self, chunk_size: u32) -> i64 {
        self.y as i64 * chunk_size as i64
    }

    /// Packs this coordinate into a key.
    #[inline]
    #[must_use]
    pub const fn key(self) -> ChunkKey {
        ChunkKey::pack(self.x, self.y)
    }
}

impl From<ChunkKey> for ChunkCoord {
    fn from(key: ChunkKey) -> Self {
        let (x, y) = key.unpack();
        Self::new(x, y)
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Lossless 64-bit encoding of a chunk coordinate.
///
/// High 32 bits hold the bit pattern of `x`, low 32 bits the bit pattern of
/// `y`. This is a reinterpretation, not arithmetic, so negative coordinates
/// round-trip exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey(u64);

impl ChunkKey {
    /// Packs `(cx, cy)` into a key.
    #[inline]
    #[must_use]
    pub const fn pack(cx: i32, cy: i32) -> Self {
        let ux = cx as u32 as u64;
        let uy = cy as u32 as u64;
        Self((ux << 32) | uy)
    }

    /// Recovers `(cx, cy)` from the key.
    #[inline]
    #[must_use]
    pub const fn unpack(self) -> (i32, i32) {
        let ux = (self.0 >> 32) as u32;
        let uy = self.0 as u32;
        (ux as i32, uy as i32)
    }

    /// Wraps a raw packed value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw packed value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns the coordinate this key encodes.
    #[inline]
    #[must_use]
    pub const fn coord(self) -> ChunkCoord {
        let (x, y) = self.unpack();
        ChunkCoord::new(x, y)
    }
}

impl From<ChunkCoord> for ChunkKey {
    fn from(coord: ChunkCoord) -> Self {
        coord.key()
    }
}

impl std::fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_layout() {
        assert_eq!(ChunkKey::pack(0, 0).raw(), 0);
        assert_eq!(ChunkKey::pack(1, 2).raw(), (1u64 << 32) | 2);
        assert_eq!(ChunkKey::pack(-1, 0).raw(), 0xFFFF_FFFF_0000_0000);
        assert_eq!(ChunkKey::pack(0, -1).raw(), 0x0000_0000_FFFF_FFFF);
    }

    #[test]
    fn test_round_trip_extremes() {
        for &(x, y) in &[
            (0, 0),
            (-1, -1),
            (i32::MIN, i32::MAX),
            (i32::MAX, i32::MIN),
            (i32::MIN, i32::MIN),
            (-4, 3),
        ] {
            assert_eq!(ChunkKey::pack(x, y).unpack(), (x, y));
        }
    }

    #[test]
    fn test_floor_div_and_mod_on_negatives() {
        assert_eq!(floor_div(-1, 64), -1);
        assert_eq!(floor_mod(-1, 64), 63);
        assert_eq!(floor_div(-64, 64), -1);
        assert_eq!(floor_mod(-64, 64), 0);
        assert_eq!(floor_div(-65, 64), -2);
        assert_eq!(floor_mod(-65, 64), 63);
        assert_eq!(floor_div(63, 64), 0);
        assert_eq!(floor_div(64, 64), 1);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_mod(7, -2), -1);
    }

    #[test]
    fn test_chunk_coord_from_world() {
        assert_eq!(ChunkCoord::from_world(0, 0, 64), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world(63, 63, 64), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world(64, 64, 64), ChunkCoord::new(1, 1));
        assert_eq!(ChunkCoord::from_world(-1, -1, 64), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_world(-64, -64, 64), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_world(-65, -65, 64), ChunkCoord::new(-2, -2));
        assert_eq!(ChunkCoord::local_offset(-1, -65, 64), (63, 63));
    }

    #[test]
    fn test_origin_does_not_overflow() {
        let c = ChunkCoord::new(i32::MIN, i32::MAX);
        assert_eq!(c.origin_x(64), i64::from(i32::MIN) * 64);
        assert_eq!(c.origin_y(64), i64::from(i32::MAX) * 64);
    }

    proptest! {
        #[test]
        fn prop_key_round_trip(x in any::<i32>(), y in any::<i32>()) {
            let key = ChunkKey::pack(x, y);
            prop_assert_eq!(key.unpack(), (x, y));
            prop_assert_eq!(ChunkCoord::from(key), ChunkCoord::new(x, y));
        }

        #[test]
        fn prop_distinct_coords_distinct_keys(
            a in any::<(i32, i32)>(),
            b in any::<(i32, i32)>(),
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(ChunkKey::pack(a.0, a.1), ChunkKey::pack(b.0, b.1));
        }

        #[test]
        fn prop_floor_division_law(a in -1_000_000i32..1_000_000, b in 1i32..10_000) {
            let q = floor_div(a, b);
            let r = floor_mod(a, b);
            prop_assert_eq!(q * b + r, a);
            prop_assert!((0..b).contains(&r));
        }

        #[test]
        fn prop_world_tile_maps_back(wx in any::<i32>(), wy in any::<i32>(), size in 1u32..=1024) {
            let coord = ChunkCoord::from_world(wx, wy, size);
            let (lx, ly) = ChunkCoord::local_offset(wx, wy, size);
            prop_assert!(lx < size && ly < size);
            prop_assert_eq!(coord.origin_x(size) + i64::from(lx), i64::from(wx));
            prop_assert_eq!(coord.origin_y(size) + i64::from(ly), i64::from(wy));
        }
    }
}
