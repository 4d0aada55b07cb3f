#[cfg(test)]
pub mod common;

#[cfg(test)]
mod test_round_trip;

#[cfg(test)]
mod test_default_suppression;


#[cfg(test)]
mod test_type_records;





#[cfg(test)]
mod test_schema;
