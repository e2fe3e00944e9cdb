//! Property identifiers, their schema, and the `Property` type.
//!
//! The schema table lists every property defined by SGF FF1–FF4 together
//! with its category, the value shapes it admits and how many values it
//! takes. The declaration order is also the order in which the encoder
//! writes properties within a node.

use std::fmt;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::error::ValueError;
use crate::model::value::{PropertyValue, SingleValue, ValueKind, ValueShape};

use ValueKind as K;
use ValueShape::{Composed, Single};

/// Property categories as grouped by the SGF standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyCategory {
    Move,
    Setup,
    NodeAnnotation,
    MoveAnnotation,
    Markup,
    Root,
    GameInfo,
    Timing,
    Miscellaneous,
    GameSpecific,
    Obsolete,
}

/// How many values a property takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// Exactly one value.
    Single,
    /// One or more values.
    List,
    /// Zero or more values; an empty list is written as `[]`.
    EList,
}

/// Schema entry for a known property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySchema {
    pub category: PropertyCategory,
    /// Admitted value shapes. Empty means any value is kept as `Unknown`.
    pub shapes: &'static [ValueShape],
    pub multiplicity: Multiplicity,
}

impl PropertySchema {
    /// Returns true if a value of this shape is admissible.
    pub fn admits(&self, shape: ValueShape) -> bool {
        if self.shapes.is_empty() {
            return true;
        }
        if shape == Single(K::None) && self.multiplicity == Multiplicity::EList {
            return true;
        }
        self.shapes.contains(&shape)
    }

    /// Returns true if any admitted shape is composed.
    pub fn allows_composed(&self) -> bool {
        self.shapes.iter().any(|s| matches!(s, Composed(..)))
    }

    /// Returns true if the empty value `[]` is admissible.
    pub fn allows_none(&self) -> bool {
        self.multiplicity == Multiplicity::EList || self.shapes.contains(&Single(K::None))
    }

    /// Returns the kind a non-composed, non-empty value is parsed as.
    pub fn single_kind(&self) -> Option<ValueKind> {
        self.shapes.iter().find_map(|s| match s {
            Single(kind) if *kind != K::None => Some(*kind),
            _ => None,
        })
    }

    /// Returns the kinds a composed value is parsed as.
    pub fn composed_kinds(&self) -> Option<(ValueKind, ValueKind)> {
        self.shapes.iter().find_map(|s| match s {
            Composed(a, b) => Some((*a, *b)),
            _ => None,
        })
    }
}

const NONE: &[ValueShape] = &[Single(K::None)];
const NUMBER: &[ValueShape] = &[Single(K::Number)];
const REAL: &[ValueShape] = &[Single(K::Real)];
const DOUBLE: &[ValueShape] = &[Single(K::Double)];
const COLOR: &[ValueShape] = &[Single(K::Color)];
const SIMPLE_TEXT: &[ValueShape] = &[Single(K::SimpleText)];
const TEXT: &[ValueShape] = &[Single(K::Text)];
const MOVE: &[ValueShape] = &[Single(K::Move)];
const POINTS: &[ValueShape] = &[Single(K::Point), Composed(K::Point, K::Point)];
const STONES: &[ValueShape] = &[Single(K::Stone), Composed(K::Stone, K::Stone)];
const POINT_PAIR: &[ValueShape] = &[Composed(K::Point, K::Point)];
const LABEL: &[ValueShape] = &[Composed(K::Point, K::SimpleText)];
const APPLICATION: &[ValueShape] = &[Composed(K::SimpleText, K::SimpleText)];
const BOARD_SIZE: &[ValueShape] = &[Single(K::Number), Composed(K::Number, K::Number)];
const FIGURE: &[ValueShape] = &[Single(K::None), Composed(K::Number, K::SimpleText)];
const ANY: &[ValueShape] = &[];

macro_rules! property_types {
    ($($name:ident => $category:ident, $shapes:ident, $multiplicity:ident;)*) => {
        /// Property identifiers defined by the SGF standard.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PropertyType {
            $($name,)*
            /// Any identifier not defined by the standard.
            Unknown,
        }

        impl PropertyType {
            /// Every known property type, in declaration order.
            pub const ALL: &'static [PropertyType] = &[$(PropertyType::$name,)*];

            /// Returns the SGF identifier, or `None` for `Unknown`.
            pub fn name(self) -> Option<&'static str> {
                match self {
                    $(PropertyType::$name => Some(stringify!($name)),)*
                    PropertyType::Unknown => None,
                }
            }

            /// Returns the schema entry, or `None` for `Unknown`.
            pub fn schema(self) -> Option<PropertySchema> {
                match self {
                    $(PropertyType::$name => Some(PropertySchema {
                        category: PropertyCategory::$category,
                        shapes: $shapes,
                        multiplicity: Multiplicity::$multiplicity,
                    }),)*
                    PropertyType::Unknown => None,
                }
            }
        }
    };
}

property_types! {
    B => Move, MOVE, Single;
    KO => Move, NONE, Single;
    MN => Move, NUMBER, Single;
    W => Move, MOVE, Single;
    AB => Setup, STONES, List;
    AE => Setup, POINTS, List;
    AW => Setup, STONES, List;
    PL => Setup, COLOR, Single;
    C => NodeAnnotation, TEXT, Single;
    DM => NodeAnnotation, DOUBLE, Single;
    GB => NodeAnnotation, DOUBLE, Single;
    GW => NodeAnnotation, DOUBLE, Single;
    HO => NodeAnnotation, DOUBLE, Single;
    N => NodeAnnotation, SIMPLE_TEXT, Single;
    UC => NodeAnnotation, DOUBLE, Single;
    V => NodeAnnotation, REAL, Single;
    BM => MoveAnnotation, DOUBLE, Single;
    DO => MoveAnnotation, NONE, Single;
    IT => MoveAnnotation, NONE, Single;
    TE => MoveAnnotation, DOUBLE, Single;
    AR => Markup, POINT_PAIR, List;
    CR => Markup, POINTS, List;
    DD => Markup, POINTS, EList;
    LB => Markup, LABEL, List;
    LN => Markup, POINT_PAIR, List;
    MA => Markup, POINTS, List;
    SL => Markup, POINTS, List;
    SQ => Markup, POINTS, List;
    TR => Markup, POINTS, List;
    AP => Root, APPLICATION, Single;
    CA => Root, SIMPLE_TEXT, Single;
    FF => Root, NUMBER, Single;
    GM => Root, NUMBER, Single;
    ST => Root, NUMBER, Single;
    SZ => Root, BOARD_SIZE, Single;
    AN => GameInfo, SIMPLE_TEXT, Single;
    BR => GameInfo, SIMPLE_TEXT, Single;
    BT => GameInfo, SIMPLE_TEXT, Single;
    CP => GameInfo, SIMPLE_TEXT, Single;
    DT => GameInfo, SIMPLE_TEXT, Single;
    EV => GameInfo, SIMPLE_TEXT, Single;
    GN => GameInfo, SIMPLE_TEXT, Single;
    GC => GameInfo, TEXT, Single;
    ON => GameInfo, SIMPLE_TEXT, Single;
    OT => GameInfo, SIMPLE_TEXT, Single;
    PB => GameInfo, SIMPLE_TEXT, Single;
    PC => GameInfo, SIMPLE_TEXT, Single;
    PW => GameInfo, SIMPLE_TEXT, Single;
    RE => GameInfo, SIMPLE_TEXT, Single;
    RO => GameInfo, SIMPLE_TEXT, Single;
    RU => GameInfo, SIMPLE_TEXT, Single;
    SO => GameInfo, SIMPLE_TEXT, Single;
    TM => GameInfo, REAL, Single;
    US => GameInfo, SIMPLE_TEXT, Single;
    WR => GameInfo, SIMPLE_TEXT, Single;
    WT => GameInfo, SIMPLE_TEXT, Single;
    BL => Timing, REAL, Single;
    OB => Timing, NUMBER, Single;
    OW => Timing, NUMBER, Single;
    WL => Timing, REAL, Single;
    FG => Miscellaneous, FIGURE, Single;
    PM => Miscellaneous, NUMBER, Single;
    VW => Miscellaneous, POINTS, EList;
    BS => Obsolete, ANY, List;
    CH => Obsolete, ANY, List;
    EL => Obsolete, ANY, List;
    EX => Obsolete, ANY, List;
    ID => Obsolete, ANY, List;
    L => Obsolete, ANY, List;
    LT => Obsolete, ANY, List;
    M => Obsolete, ANY, List;
    OM => Obsolete, ANY, List;
    OP => Obsolete, ANY, List;
    OV => Obsolete, ANY, List;
    RG => Obsolete, ANY, List;
    SC => Obsolete, ANY, List;
    SE => Obsolete, ANY, List;
    SI => Obsolete, ANY, List;
    TC => Obsolete, ANY, List;
    WS => Obsolete, ANY, List;
    HA => GameInfo, NUMBER, Single;
    KM => GameInfo, REAL, Single;
    TB => GameSpecific, POINTS, EList;
    TW => GameSpecific, POINTS, EList;
    CO => Obsolete, ANY, List;
    CV => Obsolete, ANY, List;
    DI => Obsolete, ANY, List;
    MI => Obsolete, ANY, List;
    IY => Obsolete, ANY, List;
    SU => Obsolete, ANY, List;
    IS => Obsolete, ANY, List;
    AA => Obsolete, ANY, List;
    BO => Obsolete, ANY, List;
    WO => Obsolete, ANY, List;
    NP => Obsolete, ANY, List;
    NR => Obsolete, ANY, List;
    NS => Obsolete, ANY, List;
    CS => Obsolete, ANY, List;
    MS => Obsolete, ANY, List;
    SS => Obsolete, ANY, List;
    TS => Obsolete, ANY, List;
    RP => Obsolete, ANY, List;
    AS => Obsolete, ANY, List;
    IP => Obsolete, ANY, List;
    KI => Obsolete, ANY, List;
}

lazy_static! {
    static ref NAME_TO_PROPERTY_TYPE: FxHashMap<&'static str, PropertyType> = {
        let mut map = FxHashMap::with_capacity_and_hasher(PropertyType::ALL.len(), Default::default());
        for ty in PropertyType::ALL {
            if let Some(name) = ty.name() {
                map.insert(name, *ty);
            }
        }
        map
    };
}

impl PropertyType {
    /// Looks up a property identifier. Unrecognized names map to `Unknown`.
    pub fn from_name(name: &str) -> PropertyType {
        NAME_TO_PROPERTY_TYPE
            .get(name)
            .copied()
            .unwrap_or(PropertyType::Unknown)
    }

    pub fn is_known(self) -> bool {
        self != PropertyType::Unknown
    }

    /// Returns the category, or `None` for `Unknown`.
    pub fn category(self) -> Option<PropertyCategory> {
        self.schema().map(|s| s.category)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("Unknown"))
    }
}

/// A named property carrying one or more values.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    property_type: PropertyType,
    name: String,
    values: Vec<PropertyValue>,
}

impl Property {
    /// Creates a property of a known type, checking value count and shapes
    /// against the schema. Values of kind `Unknown` are always admitted.
    ///
    /// Passing `PropertyType::Unknown` is rejected; use [`Property::from_name`].
    pub fn new(
        property_type: PropertyType,
        values: impl IntoIterator<Item = PropertyValue>,
    ) -> Result<Property, ValueError> {
        let Some(name) = property_type.name() else {
            return Err(ValueError::UnnamedUnknown);
        };
        let values: Vec<PropertyValue> = values.into_iter().collect();
        validate_values(property_type, &values)?;
        Ok(Property {
            property_type,
            name: name.to_string(),
            values,
        })
    }

    /// Creates a property with a single value.
    pub fn single(
        property_type: PropertyType,
        value: impl Into<PropertyValue>,
    ) -> Result<Property, ValueError> {
        Property::new(property_type, [value.into()])
    }

    /// Creates a known property as it was read from text: every value is
    /// kept, even where the schema allows fewer. Shapes are still checked.
    /// [`validate_values`] reports the surplus.
    pub(crate) fn decoded(
        property_type: PropertyType,
        values: Vec<PropertyValue>,
    ) -> Result<Property, ValueError> {
        let Some(name) = property_type.name() else {
            return Err(ValueError::UnnamedUnknown);
        };
        if let Some(schema) = property_type.schema() {
            check_shapes(property_type, &schema, &values)?;
        }
        Ok(Property {
            property_type,
            name: name.to_string(),
            values,
        })
    }

    /// Creates a property from its identifier. Known identifiers are checked
    /// against the schema; unknown identifiers accept any non-empty value list.
    pub fn from_name(
        name: impl Into<String>,
        values: impl IntoIterator<Item = PropertyValue>,
    ) -> Result<Property, ValueError> {
        let name = name.into();
        let property_type = PropertyType::from_name(&name);
        if property_type.is_known() {
            return Property::new(property_type, values);
        }
        let values: Vec<PropertyValue> = values.into_iter().collect();
        if values.is_empty() {
            return Err(ValueError::Empty { property: property_type });
        }
        Ok(Property {
            property_type,
            name,
            values,
        })
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// The identifier as written in SGF.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }

    /// Returns the first value.
    pub fn value(&self) -> &PropertyValue {
        &self.values[0]
    }

    /// Returns true if the property holds only the empty value `[]`.
    pub fn is_empty_value(&self) -> bool {
        matches!(self.values.as_slice(), [PropertyValue::Single(SingleValue::None)])
    }

    pub fn schema(&self) -> Option<PropertySchema> {
        self.property_type.schema()
    }
}

/// Checks `values` against the schema of `property_type`.
pub fn validate_values(
    property_type: PropertyType,
    values: &[PropertyValue],
) -> Result<(), ValueError> {
    let Some(schema) = property_type.schema() else {
        return Ok(());
    };
    if schema.multiplicity == Multiplicity::Single && values.len() > 1 {
        return Err(ValueError::TooManyValues {
            property: property_type,
            count: values.len(),
        });
    }
    check_shapes(property_type, &schema, values)?;
    // `[]` is only meaningful as the sole value.
    if values.len() > 1 {
        if let Some(index) = values
            .iter()
            .position(|v| matches!(v, PropertyValue::Single(SingleValue::None)))
        {
            return Err(ValueError::ShapeMismatch {
                property: property_type,
                index,
                found: Single(K::None).to_string(),
            });
        }
    }
    Ok(())
}

/// Non-empty, and every value that is not `Unknown` has a shape the schema
/// admits.
fn check_shapes(
    property_type: PropertyType,
    schema: &PropertySchema,
    values: &[PropertyValue],
) -> Result<(), ValueError> {
    if values.is_empty() {
        return Err(ValueError::Empty { property: property_type });
    }
    for (index, value) in values.iter().enumerate() {
        if value.has_unknown() {
            continue;
        }
        let shape = value.shape();
        if !schema.admits(shape) {
            return Err(ValueError::ShapeMismatch {
                property: property_type,
                index,
                found: shape.to_string(),
            });
        }
    }
    Ok(())
}
