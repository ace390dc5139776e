/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The builtin body tables.
//!
//! Gravitational parameters are JPL DE-era values in km^3/s^2. Long-form
//! planetary rows are the Standish & Williams tables valid 3000 BC to
//! AD 3000 (https://ssd.jpl.nasa.gov/txt/p_elem_t2.txt); the row stored
//! under Earth is the Earth-Moon barycenter row. Moon rows are osculating
//! elements about their host at J2000, ecliptic-referenced, fallback
//! fidelity only: kernel sources supersede them whenever loaded. J2 and
//! pole orientations are IAU working-group values.

use crate::astro::elements::{MeanAnomalyCorrection, OrbitalElements, PlanetaryElements};
use crate::bodies::{BodyClass, BodyConstants, ElementRecord, OblatenessRecord};
use crate::constants::celestial_objects::*;
use crate::constants::AU_KM;

const fn planetary(
    sma_au: [f64; 2],
    ecc: [f64; 2],
    inc_deg: [f64; 2],
    mean_longitude_deg: [f64; 2],
    perihelion_longitude_deg: [f64; 2],
    node_longitude_deg: [f64; 2],
    correction: Option<MeanAnomalyCorrection>,
) -> Option<ElementRecord> {
    Some(ElementRecord::Planetary(PlanetaryElements {
        sma_au,
        ecc,
        inc_deg,
        mean_longitude_deg,
        perihelion_longitude_deg,
        node_longitude_deg,
        correction,
    }))
}

const fn osculating(
    sma_km: f64,
    ecc: f64,
    inc_deg: f64,
    raan_deg: f64,
    aop_deg: f64,
    ma_deg: f64,
) -> Option<ElementRecord> {
    Some(ElementRecord::Osculating(OrbitalElements {
        sma_km,
        ecc,
        inc_deg,
        raan_deg,
        aop_deg,
        ma_deg,
    }))
}

pub(crate) const BODY_TABLE: &[BodyConstants] = &[
    BodyConstants {
        id: SUN,
        name: "Sun",
        gm_km3_s2: 1.327_124_400_18e11,
        diameter_km: 1_391_400.0,
        class: BodyClass::Star,
        elements: None,
    },
    BodyConstants {
        id: MERCURY,
        name: "Mercury",
        gm_km3_s2: 2.203_186_8e4,
        diameter_km: 4_879.0,
        class: BodyClass::Planet,
        elements: planetary(
            [0.38709843, 0.0],
            [0.20563661, 0.00002123],
            [7.00559432, -0.00590158],
            [252.25166724, 149_472.67486623],
            [77.45771895, 0.15940013],
            [48.33961819, -0.12214182],
            None,
        ),
    },
    BodyConstants {
        id: VENUS,
        name: "Venus",
        gm_km3_s2: 3.248_585_92e5,
        diameter_km: 12_104.0,
        class: BodyClass::Planet,
        elements: planetary(
            [0.72332102, -0.00000026],
            [0.00676399, -0.00005107],
            [3.39777545, 0.00043494],
            [181.97970850, 58_517.81560260],
            [131.76755713, 0.05679648],
            [76.67261496, -0.27274174],
            None,
        ),
    },
    // The long-form row describes the Earth-Moon barycenter; the planetary
    // ephemeris source splits it into Earth and Moon with the lunar series.
    BodyConstants {
        id: EARTH,
        name: "Earth",
        gm_km3_s2: 3.986_004_418e5,
        diameter_km: 12_756.0,
        class: BodyClass::Planet,
        elements: planetary(
            [1.00000018, -0.00000003],
            [0.01673163, -0.00003661],
            [-0.00054346, -0.01337178],
            [100.46691572, 35_999.37306329],
            [102.93005885, 0.31795260],
            [-5.11260389, -0.24123856],
            None,
        ),
    },
    BodyConstants {
        id: MOON,
        name: "Moon",
        gm_km3_s2: 4.902_800_066e3,
        diameter_km: 3_475.0,
        class: BodyClass::Moon { host: EARTH },
        elements: osculating(384_400.0, 0.0549, 5.145, 125.08, 318.15, 134.96),
    },
    BodyConstants {
        id: MARS,
        name: "Mars",
        gm_km3_s2: 4.282_837_362e4,
        diameter_km: 6_792.0,
        class: BodyClass::Planet,
        elements: planetary(
            [1.52371243, 0.00000097],
            [0.09336511, 0.00009149],
            [1.85181869, -0.00724757],
            [-4.56813164, 19_140.29934243],
            [-23.91744784, 0.45223625],
            [49.71320984, -0.26852431],
            None,
        ),
    },
    BodyConstants {
        id: PHOBOS,
        name: "Phobos",
        gm_km3_s2: 7.087e-4,
        diameter_km: 22.2,
        class: BodyClass::Moon { host: MARS },
        elements: osculating(9_376.0, 0.0151, 26.0, 82.9, 150.2, 92.5),
    },
    BodyConstants {
        id: DEIMOS,
        name: "Deimos",
        gm_km3_s2: 9.615e-5,
        diameter_km: 12.6,
        class: BodyClass::Moon { host: MARS },
        elements: osculating(23_463.0, 0.0002, 24.5, 78.3, 260.7, 296.2),
    },
    BodyConstants {
        id: JUPITER,
        name: "Jupiter",
        gm_km3_s2: 1.266_865_34e8,
        diameter_km: 142_984.0,
        class: BodyClass::Planet,
        elements: planetary(
            [5.20248019, -0.00002864],
            [0.04853590, 0.00018026],
            [1.29861416, -0.00322699],
            [34.33479152, 3_034.90371757],
            [14.27495244, 0.18199196],
            [100.29282654, 0.13024619],
            Some(MeanAnomalyCorrection {
                b: -0.00012452,
                c: 0.06064060,
                s: -0.35635438,
                f_deg: 38.35125000,
            }),
        ),
    },
    BodyConstants {
        id: IO,
        name: "Io",
        gm_km3_s2: 5.959_916e3,
        diameter_km: 3_643.0,
        class: BodyClass::Moon { host: JUPITER },
        elements: osculating(421_800.0, 0.0041, 2.21, 43.98, 84.13, 342.02),
    },
    BodyConstants {
        id: EUROPA,
        name: "Europa",
        gm_km3_s2: 3.202_739e3,
        diameter_km: 3_122.0,
        class: BodyClass::Moon { host: JUPITER },
        elements: osculating(671_100.0, 0.0094, 2.71, 219.11, 88.97, 171.02),
    },
    BodyConstants {
        id: GANYMEDE,
        name: "Ganymede",
        gm_km3_s2: 9.887_834e3,
        diameter_km: 5_268.0,
        class: BodyClass::Moon { host: JUPITER },
        elements: osculating(1_070_400.0, 0.0013, 2.21, 63.55, 192.42, 317.54),
    },
    BodyConstants {
        id: CALLISTO,
        name: "Callisto",
        gm_km3_s2: 7.179_289e3,
        diameter_km: 4_821.0,
        class: BodyClass::Moon { host: JUPITER },
        elements: osculating(1_882_700.0, 0.0074, 2.02, 298.85, 52.64, 181.41),
    },
    BodyConstants {
        id: SATURN,
        name: "Saturn",
        gm_km3_s2: 3.793_120_75e7,
        diameter_km: 120_536.0,
        class: BodyClass::Planet,
        elements: planetary(
            [9.54149883, -0.00003065],
            [0.05550825, -0.00032044],
            [2.49424102, 0.00451969],
            [50.07571329, 1_222.11494724],
            [92.86136063, 0.54179478],
            [113.63998702, -0.25015002],
            Some(MeanAnomalyCorrection {
                b: 0.00025899,
                c: -0.13434469,
                s: 0.87320147,
                f_deg: 38.35125000,
            }),
        ),
    },
    BodyConstants {
        id: MIMAS,
        name: "Mimas",
        gm_km3_s2: 2.503_571,
        diameter_km: 396.0,
        class: BodyClass::Moon { host: SATURN },
        elements: osculating(185_539.0, 0.0196, 28.0, 169.5, 110.6, 37.2),
    },
    BodyConstants {
        id: ENCELADUS,
        name: "Enceladus",
        gm_km3_s2: 7.211_454,
        diameter_km: 504.0,
        class: BodyClass::Moon { host: SATURN },
        elements: osculating(238_042.0, 0.0047, 28.05, 169.5, 342.5, 199.7),
    },
    BodyConstants {
        id: TETHYS,
        name: "Tethys",
        gm_km3_s2: 41.207_35,
        diameter_km: 1_062.0,
        class: BodyClass::Moon { host: SATURN },
        elements: osculating(294_672.0, 0.0001, 29.1, 169.5, 45.2, 243.4),
    },
    BodyConstants {
        id: DIONE,
        name: "Dione",
        gm_km3_s2: 73.116_46,
        diameter_km: 1_123.0,
        class: BodyClass::Moon { host: SATURN },
        elements: osculating(377_415.0, 0.0022, 28.3, 169.5, 284.0, 322.2),
    },
    BodyConstants {
        id: RHEA,
        name: "Rhea",
        gm_km3_s2: 153.942_6,
        diameter_km: 1_527.0,
        class: BodyClass::Moon { host: SATURN },
        elements: osculating(527_068.0, 0.0010, 28.2, 169.5, 172.7, 179.8),
    },
    BodyConstants {
        id: TITAN,
        name: "Titan",
        gm_km3_s2: 8.978_138_2e3,
        diameter_km: 5_150.0,
        class: BodyClass::Moon { host: SATURN },
        elements: osculating(1_221_870.0, 0.0288, 27.7, 169.2, 164.0, 163.3),
    },
    BodyConstants {
        id: HYPERION,
        name: "Hyperion",
        gm_km3_s2: 0.372_723,
        diameter_km: 270.0,
        class: BodyClass::Moon { host: SATURN },
        elements: osculating(1_500_933.0, 0.0232, 27.2, 168.3, 183.6, 86.3),
    },
    BodyConstants {
        id: IAPETUS,
        name: "Iapetus",
        gm_km3_s2: 120.503_8,
        diameter_km: 1_469.0,
        class: BodyClass::Moon { host: SATURN },
        elements: osculating(3_560_854.0, 0.0293, 17.2, 139.7, 271.6, 201.8),
    },
    BodyConstants {
        id: PHOEBE,
        name: "Phoebe",
        gm_km3_s2: 0.553_162,
        diameter_km: 213.0,
        class: BodyClass::Moon { host: SATURN },
        elements: osculating(12_947_780.0, 0.1634, 175.2, 241.6, 345.2, 287.6),
    },
    BodyConstants {
        id: URANUS,
        name: "Uranus",
        gm_km3_s2: 5.793_951_3e6,
        diameter_km: 51_118.0,
        class: BodyClass::Planet,
        elements: planetary(
            [19.18797948, -0.00020455],
            [0.04685740, -0.00001550],
            [0.77298127, -0.00180155],
            [314.20276625, 428.49512595],
            [172.43404441, 0.09266985],
            [73.96250215, 0.05739699],
            Some(MeanAnomalyCorrection {
                b: 0.00058331,
                c: -0.97731848,
                s: 0.17689245,
                f_deg: 7.67025000,
            }),
        ),
    },
    BodyConstants {
        id: MIRANDA,
        name: "Miranda",
        gm_km3_s2: 4.319_517,
        diameter_km: 472.0,
        class: BodyClass::Moon { host: URANUS },
        elements: osculating(129_900.0, 0.0013, 97.3, 167.6, 68.5, 311.3),
    },
    BodyConstants {
        id: ARIEL,
        name: "Ariel",
        gm_km3_s2: 86.4,
        diameter_km: 1_158.0,
        class: BodyClass::Moon { host: URANUS },
        elements: osculating(190_900.0, 0.0012, 97.7, 167.6, 115.3, 39.2),
    },
    BodyConstants {
        id: UMBRIEL,
        name: "Umbriel",
        gm_km3_s2: 81.5,
        diameter_km: 1_169.0,
        class: BodyClass::Moon { host: URANUS },
        elements: osculating(266_000.0, 0.0039, 97.7, 167.6, 84.7, 12.5),
    },
    BodyConstants {
        id: TITANIA,
        name: "Titania",
        gm_km3_s2: 228.2,
        diameter_km: 1_577.0,
        class: BodyClass::Moon { host: URANUS },
        elements: osculating(436_300.0, 0.0011, 97.8, 167.6, 284.4, 24.6),
    },
    BodyConstants {
        id: OBERON,
        name: "Oberon",
        gm_km3_s2: 192.4,
        diameter_km: 1_523.0,
        class: BodyClass::Moon { host: URANUS },
        elements: osculating(583_500.0, 0.0014, 97.9, 167.6, 104.4, 283.1),
    },
    BodyConstants {
        id: NEPTUNE,
        name: "Neptune",
        gm_km3_s2: 6.835_099_5e6,
        diameter_km: 49_528.0,
        class: BodyClass::Planet,
        elements: planetary(
            [30.06952752, 0.00006447],
            [0.00895439, 0.00000818],
            [1.77005520, 0.00022400],
            [304.22289287, 218.46515314],
            [46.68158724, 0.01009938],
            [131.78635853, -0.00606302],
            Some(MeanAnomalyCorrection {
                b: -0.00041348,
                c: 0.68346318,
                s: -0.10162547,
                f_deg: 7.67025000,
            }),
        ),
    },
    BodyConstants {
        id: TRITON,
        name: "Triton",
        gm_km3_s2: 1.427_53e3,
        diameter_km: 2_707.0,
        class: BodyClass::Moon { host: NEPTUNE },
        elements: osculating(354_759.0, 0.0, 157.3, 178.1, 66.1, 352.3),
    },
    BodyConstants {
        id: PLUTO,
        name: "Pluto",
        gm_km3_s2: 8.696e2,
        diameter_km: 2_376.0,
        class: BodyClass::Planet,
        elements: planetary(
            [39.48686035, 0.00449751],
            [0.24885238, 0.00006016],
            [17.14104260, 0.00000501],
            [238.96535011, 145.18042903],
            [224.09702598, -0.00968827],
            [110.30167986, -0.00809981],
            Some(MeanAnomalyCorrection {
                b: -0.01262724,
                c: 0.0,
                s: 0.0,
                f_deg: 0.0,
            }),
        ),
    },
    BodyConstants {
        id: CHARON,
        name: "Charon",
        gm_km3_s2: 1.058_8e2,
        diameter_km: 1_212.0,
        class: BodyClass::Moon { host: PLUTO },
        elements: osculating(19_591.0, 0.0002, 112.9, 227.1, 189.0, 30.9),
    },
    // Osculating at J2000, consistent with the 1999-12 and 2004-07
    // perihelion passages.
    BodyConstants {
        id: CERES,
        name: "Ceres",
        gm_km3_s2: 62.628_45,
        diameter_km: 940.0,
        class: BodyClass::SmallBody,
        elements: osculating(2.7663 * AU_KM, 0.078375, 10.5859, 80.4097, 73.1534, 5.772866),
    },
    BodyConstants {
        id: HALLEY,
        name: "Halley",
        gm_km3_s2: 1.5e-5,
        diameter_km: 11.0,
        class: BodyClass::SmallBody,
        elements: osculating(17.834 * AU_KM, 0.96714, 162.262, 58.42, 111.33, 66.41),
    },
];

pub(crate) const OBLATENESS_TABLE: &[OblatenessRecord] = &[
    OblatenessRecord {
        id: EARTH,
        j2: 1.082_63e-3,
        equatorial_radius_km: 6_378.137,
        pole_ra_deg: 0.0,
        pole_dec_deg: 90.0,
    },
    OblatenessRecord {
        id: MARS,
        j2: 1.955_5e-3,
        equatorial_radius_km: 3_396.19,
        pole_ra_deg: 317.681_43,
        pole_dec_deg: 52.886_50,
    },
    OblatenessRecord {
        id: JUPITER,
        j2: 1.473_6e-2,
        equatorial_radius_km: 71_492.0,
        pole_ra_deg: 268.056_595,
        pole_dec_deg: 64.495_303,
    },
    OblatenessRecord {
        id: SATURN,
        j2: 1.629_8e-2,
        equatorial_radius_km: 60_268.0,
        pole_ra_deg: 40.589,
        pole_dec_deg: 83.537,
    },
    OblatenessRecord {
        id: URANUS,
        j2: 3.343_43e-3,
        equatorial_radius_km: 25_559.0,
        pole_ra_deg: 257.311,
        pole_dec_deg: -15.175,
    },
    OblatenessRecord {
        id: NEPTUNE,
        j2: 3.411e-3,
        equatorial_radius_km: 24_764.0,
        pole_ra_deg: 299.36,
        pole_dec_deg: 43.46,
    },
];
