/*
 * The packed reading of the three detector lines, sampled once per cycle:
 * bit2 pedestrian request, bit1 car on road A, bit0 car on road B.
 */

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorCode(u8);

impl SensorCode {
    /// Number of distinct codes, and so the width of every transition row.
    pub const COUNT: usize = 8;

    const MASK: u8 = 0b111;

    pub const fn new(pedestrian: bool, road_a: bool, road_b: bool) -> Self {
        SensorCode(((pedestrian as u8) << 2) | ((road_a as u8) << 1) | road_b as u8)
    }

    /*
     * Anything above bit2 belongs to other lines sharing the port and is
     * dropped here, so a code is always 0..=7.
     */
    pub const fn from_bits(bits: u8) -> Self {
        SensorCode(bits & Self::MASK)
    }

    pub fn all() -> impl Iterator<Item = SensorCode> {
        (0..Self::COUNT as u8).map(SensorCode)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn pedestrian(&self) -> bool {
        self.0 & 0b100 != 0
    }

    pub const fn road_a(&self) -> bool {
        self.0 & 0b010 != 0
    }

    pub const fn road_b(&self) -> bool {
        self.0 & 0b001 != 0
    }
}
