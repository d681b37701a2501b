use crate::models::Chromatogram;

// Raw LC-MS/MS trace of a small molecule, 107 samples with one dominant
// peak around 2.70.
pub const TOY_POSITIONS: [f64; 107] = [
    2.23095, 2.239716667, 2.248866667, 2.25765, 2.266416667, 2.275566667, 2.2847, 2.293833333,
    2.304066667, 2.315033333, 2.325983333, 2.336566667, 2.3468, 2.357016667, 2.367283333,
    2.377183333, 2.387083333, 2.39735, 2.40725, 2.4175, 2.4274, 2.4373, 2.44755, 2.45745,
    2.4677, 2.477966667, 2.488216667, 2.498516667, 2.5084, 2.5183, 2.5282, 2.538466667,
    2.548366667, 2.558266667, 2.568516667, 2.578783333, 2.588683333, 2.59895, 2.6092,
    2.619466667, 2.630066667, 2.64065, 2.65125, 2.662116667, 2.672716667, 2.6833, 2.6939,
    2.7045, 2.715083333, 2.725683333, 2.736266667, 2.746866667, 2.757833333, 2.768416667,
    2.779016667, 2.789616667, 2.8002, 2.810116667, 2.820033333, 2.830316667, 2.840216667,
    2.849766667, 2.859316667, 2.868866667, 2.878783333, 2.888683333, 2.898233333, 2.907783333,
    2.916033333, 2.924266667, 2.93215, 2.940383333, 2.947933333, 2.955816667, 2.964066667,
    2.97195, 2.979833333, 2.987716667, 2.995616667, 3.003516667, 3.011416667, 3.01895,
    3.026833333, 3.034366667, 3.042266667, 3.0498, 3.05735, 3.065233333, 3.073133333,
    3.080666667, 3.0882, 3.095733333, 3.103633333, 3.111533333, 3.119066667, 3.126966667,
    3.134866667, 3.14275, 3.15065, 3.15855, 3.166433333, 3.174333333, 3.182233333, 3.190133333,
    3.198016667, 3.205916667, 3.213166667,
];

pub const TOY_INTENSITIES: [f64; 107] = [
    1447.0, 2139.0, 1699.0, 755.0, 1258.0, 1070.0, 944.0, 1258.0, 1573.0, 1636.0, 1762.0,
    1447.0, 1133.0, 1321.0, 1762.0, 1133.0, 1447.0, 2391.0, 692.0, 1636.0, 2957.0, 1321.0,
    1573.0, 1196.0, 1258.0, 881.0, 1384.0, 2076.0, 1133.0, 1699.0, 1384.0, 692.0, 1636.0,
    1133.0, 1573.0, 1825.0, 1510.0, 2391.0, 4342.0, 10382.0, 17618.0, 51093.0, 153970.0,
    368094.0, 632114.0, 869730.0, 962547.0, 966489.0, 845055.0, 558746.0, 417676.0, 270942.0,
    184865.0, 101619.0, 59776.0, 44863.0, 31587.0, 24036.0, 20450.0, 20324.0, 11074.0, 9879.0,
    10508.0, 7928.0, 7110.0, 6733.0, 6481.0, 5726.0, 6921.0, 6670.0, 5537.0, 4971.0, 4719.0,
    4782.0, 5097.0, 5789.0, 4279.0, 5411.0, 4530.0, 3524.0, 2139.0, 3335.0, 3083.0, 4342.0,
    4279.0, 3083.0, 3649.0, 4216.0, 4216.0, 3964.0, 2957.0, 2202.0, 2391.0, 2643.0, 3524.0,
    2328.0, 2202.0, 3649.0, 2706.0, 3020.0, 3335.0, 2580.0, 2328.0, 2894.0, 3146.0, 2769.0,
    2517.0,
];

pub const TOY_LEFT: f64 = 2.477966667;
pub const TOY_RIGHT: f64 = 3.01895;
pub const TOY_APEX: f64 = 2.7045;

pub fn toy_chromatogram() -> Chromatogram {
    Chromatogram::from_pairs(TOY_POSITIONS.iter().copied().zip(TOY_INTENSITIES.iter().copied()))
}
