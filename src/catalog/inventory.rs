use super::Vehicle;

struct Entry {
    model: &'static str,
    trim: &'static str,
    year: u16,
    price: u32,
    image: &'static str,
    features: &'static [&'static str],
    available: bool,
}

const LAND_ROVER_INVENTORY: &[Entry] = &[
    Entry {
        model: "Range Rover Sport",
        trim: "Dynamic SE",
        year: 2025,
        price: 83_000,
        image: "/images/range-rover-sport.jpg",
        features: &[
            "3.0L Turbocharged Inline-6 Mild Hybrid",
            "Dynamic Air Suspension",
            "Pivi Pro Infotainment with 13.1\" Touchscreen",
            "Meridian Surround Sound System",
            "Terrain Response 2",
        ],
        available: true,
    },
    Entry {
        model: "Defender 110",
        trim: "X-Dynamic SE",
        year: 2025,
        price: 68_500,
        image: "/images/defender-110.jpg",
        features: &[
            "Permanent All-Wheel Drive with Twin-Speed Transfer Box",
            "Electronic Air Suspension",
            "ClearSight Ground View",
            "Wade Sensing up to 900mm",
            "Configurable Terrain Response",
        ],
        available: true,
    },
    Entry {
        model: "Discovery Sport",
        trim: "S",
        year: 2025,
        price: 51_000,
        image: "/images/discovery-sport.jpg",
        features: &[
            "5+2 Seating Configuration",
            "Adaptive Cruise Control",
            "Wireless Apple CarPlay and Android Auto",
            "All-Wheel Drive",
            "Up to 1,794L Cargo Space",
        ],
        available: true,
    },
    Entry {
        model: "Range Rover Velar",
        trim: "Dynamic SE",
        year: 2025,
        price: 64_000,
        image: "/images/range-rover-velar.jpg",
        features: &[
            "Flush Deployable Door Handles",
            "Pivi Pro with 11.4\" Curved Glass Touchscreen",
            "Matrix LED Headlights",
            "Air Quality Sensing with PM2.5 Filtration",
        ],
        available: false,
    },
    Entry {
        model: "Range Rover Evoque",
        trim: "S",
        year: 2025,
        price: 53_000,
        image: "/images/range-rover-evoque.jpg",
        features: &[
            "ClearSight Interior Rear View Mirror",
            "Mild Hybrid Powertrain",
            "Panoramic Roof",
            "Blind Spot Assist",
        ],
        available: true,
    },
    Entry {
        model: "Range Rover",
        trim: "SE",
        year: 2025,
        price: 108_000,
        image: "/images/range-rover.jpg",
        features: &[
            "4.4L Twin-Turbo V8",
            "All-Wheel Steering",
            "Executive Class Rear Seats",
            "Meridian Signature Sound System",
            "Cabin Air Purification Pro",
        ],
        available: false,
    },
];

/// The dealership lineup, in showroom order. The first entry is the
/// fallback for unmatched lookups.
pub fn land_rover_inventory() -> Vec<Vehicle> {
    LAND_ROVER_INVENTORY
        .iter()
        .map(|entry| Vehicle {
            model: entry.model.to_string(),
            trim: entry.trim.to_string(),
            year: entry.year,
            price: entry.price,
            image: entry.image.to_string(),
            features: entry.features.iter().map(|f| f.to_string()).collect(),
            available: entry.available,
        })
        .collect()
}
