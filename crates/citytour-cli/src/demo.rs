use citytour_core::{NetworkSpec, Road};

const CITIES: [&str; 10] = [
    "Casablanca",
    "Rabat",
    "Marrakech",
    "Fes",
    "Tanger",
    "Agadir",
    "Meknes",
    "Oujda",
    "Tetouan",
    "El Jadida",
];

// (from, to, km)
const ROADS: [(usize, usize, u32); 14] = [
    (0, 1, 87),
    (0, 2, 243),
    (0, 9, 96),
    (0, 3, 295),
    (1, 4, 250),
    (1, 3, 207),
    (1, 6, 138),
    (2, 5, 258),
    (2, 9, 200),
    (3, 6, 60),
    (3, 7, 332),
    (3, 4, 303),
    (4, 8, 60),
    (5, 9, 296),
];

/// Sample queries run by the `demo` command: Casablanca -> Oujda and Agadir -> Tetouan.
pub const SAMPLE_QUERIES: [(usize, usize); 2] = [(0, 7), (5, 8)];

/// Ten Moroccan cities joined by 14 roads, distances in km.
pub fn morocco() -> NetworkSpec {
    NetworkSpec {
        cities: CITIES.iter().map(|c| c.to_string()).collect(),
        roads: ROADS
            .iter()
            .map(|&(from, to, distance)| Road { from, to, distance })
            .collect(),
    }
}
