// catalog.rs
//
// Site query keys for the search filters, grouped the way the help
// browser presents them. Reference data only: the crawler passes filters
// through without checking them here.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub description: &'static str,
    pub filters: &'static str,
}

/// A filter taking one (or a comma list) of a fixed set of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceFilter {
    pub title: &'static str,
    pub url_key: &'static str,
    pub options: &'static [(&'static str, &'static str)],
    pub example: Example,
}

/// A filter switched on with a single value, or taking a free number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagFilter {
    pub name: &'static str,
    pub url_key: &'static str,
    pub value: FlagValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagValue {
    Fixed(&'static str),
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterGroup {
    pub title: &'static str,
    pub filters: &'static [FlagFilter],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionContent {
    Choices(&'static [ChoiceFilter]),
    Groups {
        groups: &'static [FilterGroup],
        example: Example,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub key: &'static str,
    pub title: &'static str,
    pub content: SectionContent,
}

const fn flag(name: &'static str, url_key: &'static str) -> FlagFilter {
    FlagFilter {
        name,
        url_key,
        value: FlagValue::Fixed("1"),
    }
}

const fn number(name: &'static str, url_key: &'static str) -> FlagFilter {
    FlagFilter {
        name,
        url_key,
        value: FlagValue::Number,
    }
}

pub const SORT_BY: &[ChoiceFilter] = &[ChoiceFilter {
    title: "Sorting options",
    url_key: "tri",
    options: &[
        ("By selection", "initial"),
        ("By price", "a_px"),
        ("By surface", "a_surface"),
        ("By location", "a_ville"),
        ("By date", "d_dt_crea"),
    ],
    example: Example {
        description: "sort the ads by creation date:",
        filters: "tri=d_dt_crea",
    },
}];

pub const PROPERTY_TYPE: &[ChoiceFilter] = &[
    ChoiceFilter {
        title: "Property type",
        url_key: "idtypebien",
        options: &[
            ("Apartment", "1"),
            ("House", "2"),
            ("Car park", "3"),
            ("Shop", "6"),
            ("Commercial", "7"),
            ("Office", "8"),
            ("Lofts - Ateliers - Land", "9"),
            ("Various", "10"),
            ("Property", "11"),
            ("Building", "12"),
            ("Castle", "13"),
            ("Hotels Particuliers", "14"),
        ],
        example: Example {
            description: "look for houses and apartments only:",
            filters: "idtypebien=1,2",
        },
    },
    ChoiceFilter {
        title: "Building age",
        url_key: "naturebien",
        options: &[("Old", "1"), ("New", "2"), ("In construction", "4")],
        example: Example {
            description: "look for new construction only:",
            filters: "naturebien=2",
        },
    },
];

pub const KITCHEN_AND_HEATING: &[ChoiceFilter] = &[
    ChoiceFilter {
        title: "Kitchen type",
        url_key: "idtypecuisine",
        options: &[
            ("Separated kitchen", "3"),
            ("Open kitchen", "2"),
            ("Kitchenette", "5"),
            ("Fitted kitchen", "9"),
        ],
        example: Example {
            description: "an open kitchen:",
            filters: "idtypecuisine=2",
        },
    },
    ChoiceFilter {
        title: "Heating type",
        url_key: "idtypechauffage",
        options: &[
            ("Individual", "8192"),
            ("Central", "4096"),
            ("Electric", "2048"),
            ("Gas", "512"),
            ("Fuel", "1024"),
            ("Radiator", "128"),
            ("Underfloor", "256"),
        ],
        example: Example {
            description: "centralised underfloor heating:",
            filters: "idtypechauffage=4096,256",
        },
    },
];

pub const PROPERTY_SIZE: &[FilterGroup] = &[FilterGroup {
    title: "Property size",
    filters: &[
        number("Minimum price", "pxmin"),
        number("Maximum price", "pxmax"),
        number("Minimum surface", "surfacemin"),
        number("Maximum surface", "surfacemax"),
        number("Number of rooms", "nb_pieces"),
        number("Lower floor", "etagemin"),
        number("Higher floor", "etagemax"),
        number("Number of bedrooms", "nb_chambres"),
        number("Minimum land surface", "surf_terrainmin"),
        number("Maximum land surface", "surf_terrainmax"),
    ],
}];

pub const AMENITIES_AND_AD_FILTERS: &[FilterGroup] = &[
    FilterGroup {
        title: "Ad options",
        filters: &[
            flag("Ad with video", "video"),
            flag("Ad with virtual visit", "vv"),
            FlagFilter {
                name: "Ad with photos",
                url_key: "photo",
                value: FlagValue::Fixed("15"),
            },
            flag("Exclusive", "si_mandatexclusif"),
            flag("Price has changed", "siBaissePrix"),
        ],
    },
    FilterGroup {
        title: "Amenities",
        filters: &[
            flag("Last floor", "si_dernieretage"),
            flag("Separated toilets", "si_toilettes_separees"),
            flag("Bath tub", "nb_salles_de_bainsmin"),
            flag("Bathroom", "nb_salles_deaumin"),
            flag("Separate entrance", "si_entree"),
            flag("Living room", "si_sejour"),
            flag("Dining room", "si_salle_a_manger"),
            flag("Terrace", "si_terrasse"),
            number("Balcony", "nb_balconsmin"),
            flag("Car park", "si_parkings"),
            flag("Car box", "si_boxes"),
            flag("Cellar", "si_cave"),
            flag("Fire place", "si_cheminee"),
            flag("Wooden floor", "si_parquet"),
            flag("Lift", "si_ascenseur"),
            flag("Swimming pool", "si_piscine"),
            flag("Built-in wardrobe", "si_placards"),
            flag("Interphone", "si_interphone"),
            flag("Security code", "si_digicode"),
            flag("Concierge", "si_gardien"),
            flag("Disabled access", "si_handicape"),
            flag("Alarm", "si_alarme"),
            flag("Without vis-a-vis", "si_visavis"),
            flag("Nice view", "si_vue"),
            flag("South facing", "si_sud"),
            flag("Air conditioning", "si_climatisation"),
        ],
    },
];

pub const SECTIONS: &[Section] = &[
    Section {
        key: "sort-by",
        title: "Sort options",
        content: SectionContent::Choices(SORT_BY),
    },
    Section {
        key: "property-type",
        title: "Property types",
        content: SectionContent::Choices(PROPERTY_TYPE),
    },
    Section {
        key: "property-size",
        title: "Price, size and number of rooms",
        content: SectionContent::Groups {
            groups: PROPERTY_SIZE,
            example: Example {
                description: "look for a minimum surface of 70 sqm, 2 bedrooms for maximum 500 000 euros:",
                filters: "surfacemin=70 nb_chambres=2 pxmax=500000",
            },
        },
    },
    Section {
        key: "kitchen-and-heating",
        title: "Kitchen and heating types",
        content: SectionContent::Choices(KITCHEN_AND_HEATING),
    },
    Section {
        key: "amenities-and-ad-filters",
        title: "Amenities and ad filters",
        content: SectionContent::Groups {
            groups: AMENITIES_AND_AD_FILTERS,
            example: Example {
                description: "add a lift, a parking and the air conditioning:",
                filters: "si_ascenseur=1 si_climatisation=1 si_parkings=1",
            },
        },
    },
];

pub fn section(key: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|s| s.key == key)
}

fn flag_filters() -> impl Iterator<Item = &'static FlagFilter> {
    SECTIONS
        .iter()
        .flat_map(|s| match s.content {
            SectionContent::Groups { groups, .. } => groups,
            SectionContent::Choices(_) => &[][..],
        })
        .flat_map(|g| g.filters.iter())
}

/// Query key and value of a switch-style filter, by display name
/// (case-insensitive). Numeric filters have no fixed value and need
/// `lookup_key`.
pub fn lookup(name: &str) -> Option<(&'static str, &'static str)> {
    flag_filters()
        .find(|f| f.name.eq_ignore_ascii_case(name))
        .and_then(|f| match f.value {
            FlagValue::Fixed(value) => Some((f.url_key, value)),
            FlagValue::Number => None,
        })
}

/// Query key of any flag or numeric filter, by display name.
pub fn lookup_key(name: &str) -> Option<&'static str> {
    flag_filters()
        .find(|f| f.name.eq_ignore_ascii_case(name))
        .map(|f| f.url_key)
}

/// Query key and value of one option of a multi-valued filter, e.g.
/// `("Property type", "House")`.
pub fn lookup_choice(filter: &str, option: &str) -> Option<(&'static str, &'static str)> {
    SECTIONS
        .iter()
        .filter_map(|s| match s.content {
            SectionContent::Choices(choices) => Some(choices),
            SectionContent::Groups { .. } => None,
        })
        .flatten()
        .find(|c| c.title.eq_ignore_ascii_case(filter))
        .and_then(|c| {
            c.options
                .iter()
                .find(|(label, _)| label.eq_ignore_ascii_case(option))
                .map(|(_, value)| (c.url_key, *value))
        })
}
