//! The Crayola crayon table.

use core::fmt;

macro_rules! crayons {
    ($($name:ident => $hex:literal,)*) => {
        /// A Crayola crayon, numbered in table order.
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum Crayon {
            $($name,)*
        }

        impl Crayon {
            /// Every crayon, in table order.
            pub const ALL: &'static [Crayon] = &[$(Crayon::$name,)*];

            /// The crayon's name, as written in the table.
            pub fn name(self) -> &'static str {
                match self {
                    $(Crayon::$name => stringify!($name),)*
                }
            }

            /// The crayon's RGB color as six hex digits, without alpha.
            pub fn rgb_hex(self) -> &'static str {
                match self {
                    $(Crayon::$name => $hex,)*
                }
            }
        }
    };
}

crayons! {
    Mahogany => "CD4A4A",
    FuzzyWuzzyBrown => "CC6666",
    Chestnut => "BC5D58",
    RedOrange => "FF5349",
    SunsetOrange => "FD5E53",
    Bittersweet => "FD7C6E",
    Melon => "FDBCB4",
    OutrageousOrange => "FF6E4A",
    VividTangerine => "FFA089",
    BurntSienna => "EA7E5D",
    Brown => "B4674D",
    Sepia => "A5694F",
    Orange => "FF7538",
    BurntOrange => "FF7F49",
    Copper => "DD9475",
    MangoTango => "FF8243",
    AtomicTangerine => "FFA474",
    Beaver => "9F8170",
    AntiqueBrass => "CD9575",
    DesertSand => "EFCDB8",
    RawSienna => "D68A59",
    Tumbleweed => "DEAA88",
    Tan => "FAA76C",
    Peach => "FFCFAB",
    MacaroniandCheese => "FFBD88",
    Apricot => "FDD9B5",
    NeonCarrot => "FFA343",
    Almond => "EFDBC5",
    YellowOrange => "FFB653",
    Gold => "E7C697",
    Shadow => "8A795D",
    BananaMania => "FAE7B5",
    Sunglow => "FFCF48",
    Goldenrod => "FCD975",
    Dandelion => "FDDB6D",
    Yellow => "FCE883",
    GreenYellow => "F0E891",
    SpringGreen => "ECEABE",
    OliveGreen => "BAB86C",
    LaserLemon => "FDFC74",
    UnmellowYellow => "FDFC74",
    Canary => "FFFF99",
    YellowGreen => "C5E384",
    InchWorm => "B2EC5D",
    Asparagus => "87A96B",
    GrannySmithApple => "A8E4A0",
    ElectricLime => "1DF914",
    ScreaminGreen => "76FF7A",
    Fern => "71BC78",
    ForestGreen => "6DAE81",
    SeaGreen => "9FE2BF",
    Green => "1CAC78",
    MountainMeadow => "30BA8F",
    Shamrock => "45CEA2",
    JungleGreen => "3BB08F",
    CaribbeanGreen => "1CD3A2",
    TropicalRainForest => "17806D",
    PineGreen => "158078",
    RobinEggBlue => "1FCECB",
    Aquamarine => "78DBE2",
    TurquoiseBlue => "77DDE7",
    SkyBlue => "80DAEB",
    OuterSpace => "414A4C",
    BlueGreen => "199EBD",
    PacificBlue => "1CA9C9",
    Cerulean => "1DACD6",
    Cornflower => "9ACEEB",
    MidnightBlue => "1A4876",
    NavyBlue => "1974D2",
    Denim => "2B6CC4",
    Blue => "1F75FE",
    Periwinkle => "C5D0E6",
    CadetBlue => "B0B7C6",
    Indigo => "5D76CB",
    WildBlueYonder => "A2ADD0",
    Manatee => "979AAA",
    BlueBell => "ADADD6",
    BlueViolet => "7366BD",
    PurpleHeart => "7442C8",
    RoyalPurple => "7851A9",
    PurpleMountainsMajesty => "9D81BA",
    Violet => "926EAE",
    Wisteria => "CDA4DE",
    VividViolet => "8F509D",
    Fuchsia => "C364C5",
    ShockingPink => "FB7EFD",
    PinkFlamingo => "FC74FD",
    Plum => "8E4585",
    HotMagenta => "FF1DCE",
    PurplePizzazz => "FF1DCE",
    RazzleDazzleRose => "FF48D0",
    Orchid => "E6A8D7",
    RedViolet => "C0448F",
    Eggplant => "6E5160",
    Cerise => "DD4492",
    WildStrawberry => "FF43A4",
    Magenta => "F664AF",
    Lavender => "FCB4D5",
    CottonCandy => "FFBCD9",
    VioletRed => "F75394",
    CarnationPink => "FFAACC",
    Razzmatazz => "E3256B",
    PiggyPink => "FDD7E4",
    JazzberryJam => "CA3767",
    Blush => "DE5D83",
    TickleMePink => "FC89AC",
    PinkSherbet => "F780A1",
    Maroon => "C8385A",
    Red => "EE204D",
    RadicalRed => "FF496C",
    Mauvelous => "EF98AA",
    WildWatermelon => "FC6C85",
    Scarlet => "FC2847",
    Salmon => "FF9BAA",
    BrickRed => "CB4154",
    White => "EDEDED",
    Timberwolf => "DBD7D2",
    Silver => "CDC5C2",
    Gray => "95918C",
    Black => "232323",
}

impl Crayon {
    /// The crayon's position in the table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks up a crayon by its position in the table.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Crayon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
