// Modèle: user.rs
pub mod user;
pub use user::{
    NewUser, User, UsLgParamSchema, UsLgRespSchema, UsPkParamSchema, UsPkRespSchema,
    UsReParamSchema, UsReRespSchema, UsRfParamSchema,
};

// Modèle: watch.rs
pub mod watch;
pub use watch::{
    WaCrParamSchema, WaCrRespSchema, WaDsContentSchema, WaFeParamSchema, WaFeRespSchema,
    WaImContentSchema, WaLiParamSchema, WaLiRespSchema, WaNaParamSchema, WaNaRespSchema,
    WaTwParamSchema, WaTwRespSchema, Watch, WatchImageType, WatchStatus,
};

// Modèle: brand.rs
pub mod brand;
pub use brand::{
    BrCrParamSchema, BrCrRespSchema, BrPhParamSchema, BrPhRespSchema, BrTpParamSchema,
    BrTpRespSchema, BrandImageType,
};

// Modèle: social_link.rs
pub mod social_link;
pub use social_link::{SlReParamSchema, SlReRespSchema};
