/*
 * The light patterns the controller emits.
 *
 * A crossing has two vehicle signal heads, one per road, and one pedestrian
 * head. Each vehicle head shows exactly one aspect at a time, so a pattern is
 * built from one `Aspect` per road rather than from loose bits. The packed
 * encodings below are what the signal lines expect.
 */

/// Road A runs east-west, road B runs north-south.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Leg {
    A,
    B,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Aspect {
    Red,
    Amber,
    Green,
}

impl Aspect {
    // Road B's lamps sit in bits 2..0, road A's in bits 5..3.
    const fn bits(self) -> u8 {
        match self {
            Aspect::Red => 0b100,
            Aspect::Amber => 0b010,
            Aspect::Green => 0b001,
        }
    }
}

/// One red/amber/green triple, ready to be put on three output pins.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rag {
    pub leg: Leg,
    pub red: bool,
    pub amber: bool,
    pub green: bool,
}

impl Rag {
    pub fn new(leg: Leg, aspect: Aspect) -> Self {
        Self {
            leg,
            red: aspect == Aspect::Red,
            amber: aspect == Aspect::Amber,
            green: aspect == Aspect::Green,
        }
    }
}

/// The vehicle lights of both roads.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrafficLights {
    a: Aspect,
    b: Aspect,
}

impl TrafficLights {
    pub const fn new(a: Aspect, b: Aspect) -> Self {
        TrafficLights { a, b }
    }

    pub const fn aspect(&self, leg: Leg) -> Aspect {
        match leg {
            Leg::A => self.a,
            Leg::B => self.b,
        }
    }

    pub fn rag(&self, leg: Leg) -> Rag {
        Rag::new(leg, self.aspect(leg))
    }

    /*
     * The 6-bit pattern: bit5 A red, bit4 A amber, bit3 A green, bit2 B red,
     * bit1 B amber, bit0 B green.
     */
    pub const fn bits(&self) -> u8 {
        (self.a.bits() << 3) | self.b.bits()
    }
}

/// The pedestrian head. `Blank` lights nothing; alternating it with
/// `DontWalk` across states makes the don't-walk lamp flash.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WalkLight {
    Walk,
    DontWalk,
    Blank,
}

impl WalkLight {
    /// Walk is bit3, don't-walk is bit1.
    pub const fn bits(&self) -> u8 {
        match self {
            WalkLight::Walk => 0x08,
            WalkLight::DontWalk => 0x02,
            WalkLight::Blank => 0x00,
        }
    }

    pub fn walk(&self) -> bool {
        matches!(self, WalkLight::Walk)
    }

    pub fn dont_walk(&self) -> bool {
        matches!(self, WalkLight::DontWalk)
    }
}
