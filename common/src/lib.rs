mod macros;

crate::agg_mod![config, db, form, models, submission, utils, validation];
