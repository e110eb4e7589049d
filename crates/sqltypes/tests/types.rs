//! Column type codecs.

#[cfg(test)]
mod tests {
    #![allow(clippy::approx_constant)]

    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use sqltypes::{
        ColumnType, DataType, DecodeError, Dialect, Value,
        decode::Decode,
        encode::Encode,
        types::{BinUuid, Cidr, Date, Inet, Json, JsonMap, NanoId, Null, RawJson, Time, Url, Uuid},
    };
    use sqltypes_test::test_codec;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Attributes {
        name: String,
        age: u32,
        tags: Vec<String>,
    }

    test_codec!(null<Option<i32>>(Value::null() => None::<i32>));

    test_codec!(bool<bool>(false => false, 1 => true));

    test_codec!(i64<i64>(9358295312_i64 => 9358295312_i64, "6" => 6_i64));

    test_codec!(f64<f64>(939399419.1225182_f64 => 939399419.1225182_f64));

    test_codec!(str<String>("this is foo" => "this is foo".to_string(), "" => String::new()));

    test_codec!(bytes<Vec<u8>>(
        vec![0xDE_u8, 0xAD, 0xBE, 0xEF] => vec![0xDE_u8, 0xAD, 0xBE, 0xEF],
        Vec::<u8>::new() => Vec::<u8>::new(),
    ));

    test_codec!(json_struct<Json<Attributes>>(
        r#"{"name":"json-1","age":18,"tags":["tag1","tag2"]}"# => Json(Attributes {
            name: "json-1".into(),
            age: 18,
            tags: vec!["tag1".into(), "tag2".into()],
        }),
    ));

    test_codec!(json_map<JsonMap>(
        r#"{"age":18,"orgs":{"orga":"orga"}}"# => JsonMap::from_iter([
            ("age", json!(18)),
            ("orgs", json!({"orga": "orga"})),
        ]),
        Value::null() => JsonMap::new(),
    ));

    test_codec!(raw_json<RawJson>(
        r#"{"a": [1, 2]}"# => RawJson::new(r#"{"a": [1, 2]}"#).unwrap(),
    ));

    test_codec!(uuid<Uuid>(
        "936da01f-9abd-4d9d-80c7-02af85c822a8" => Uuid::parse("936da01f-9abd-4d9d-80c7-02af85c822a8").unwrap(),
    ));

    test_codec!(bin_uuid<BinUuid>(
        "936da01f-9abd-4d9d-80c7-02af85c822a8" => BinUuid::parse("936da01f-9abd-4d9d-80c7-02af85c822a8").unwrap(),
    ));

    test_codec!(date<Date>(
        "2021-08-01" => Date::new(2021, 8, 1).unwrap(),
        "2021-08-01 22:00:00" => Date::new(2021, 8, 1).unwrap(),
    ));

    test_codec!(time<Time>(
        "01:02:03" => Time::new(1, 2, 3, 0).unwrap(),
        "23:59:59.123456789" => Time::new(23, 59, 59, 123_456_789).unwrap(),
    ));

    test_codec!(url<Url>(
        "http://www.example.org/a?b=c" => Url::parse("http://www.example.org/a?b=c").unwrap(),
    ));

    test_codec!(cidr<Cidr>(
        "192.168.1.0/24" => Cidr::parse("192.168.1.0/24").unwrap(),
        "2001:db8::/32" => Cidr::parse("2001:db8::/32").unwrap(),
    ));

    test_codec!(inet<Inet>(
        "192.168.1.10" => Inet::parse("192.168.1.10").unwrap(),
        "10.0.0.1/32" => Inet::parse("10.0.0.1").unwrap(),
    ));

    test_codec!(nanoid<NanoId>("V1StGXR8Z5jd" => NanoId::new("V1StGXR8Z5jd")));

    test_codec!(null_i64<Null<i64>>(
        "6" => Null::new(6_i64),
        Value::null() => Null::<i64>::null(),
    ));

    #[test]
    fn malformed_input_is_rejected() {
        assert!(Json::<Attributes>::decode(&Value::text("{")).is_err());
        assert!(JsonMap::decode(&Value::text("[1,2]")).is_err());
        assert!(RawJson::decode(&Value::text("nope")).is_err());
        assert!(Uuid::decode(&Value::text("1234")).is_err());
        assert!(Date::decode(&Value::text("2021-13-01")).is_err());
        assert!(Time::decode(&Value::text("25:00:00")).is_err());
        assert!(Url::decode(&Value::text("/relative/only")).is_err());
        assert!(Cidr::decode(&Value::text("10.0.0.0/99")).is_err());
        assert!(Inet::decode(&Value::text("10.0.0")).is_err());
        assert!(Null::<i64>::decode(&Value::text("test")).is_err());
        assert!(matches!(
            Date::decode(&Value::from(3)),
            Err(DecodeError::DataType(DataType::Int))
        ));
    }

    #[test]
    fn json_encodes_compact_tagged_text() -> anyhow::Result<()> {
        let encoded = Json(json!({"b": 1, "a": [true, null]})).encode()?;
        assert_eq!(encoded.type_info(), DataType::Json);
        assert_eq!(encoded.as_text()?, r#"{"a":[true,null],"b":1}"#);
        Ok(())
    }

    #[test]
    fn empty_raw_json_is_null() -> anyhow::Result<()> {
        assert!(RawJson::default().encode()?.is_null());
        assert_eq!(RawJson::decode(&Value::null())?.as_str(), "null");
        Ok(())
    }

    #[test]
    fn uuid_predicates() -> anyhow::Result<()> {
        let id = BinUuid::new_v4();
        assert!(!id.is_nil());
        assert!(!id.is_empty());
        assert_eq!(id.len(), 36);
        assert_eq!(id.len_bytes(), 16);
        assert_eq!(BinUuid::decode(&id.encode()?)?, id);

        let nil = Uuid::parse("00000000-0000-0000-0000-000000000000")?;
        assert!(nil.is_nil());
        assert!(nil.is_empty());
        assert_eq!(nil, Uuid::nil());
        Ok(())
    }

    #[test]
    fn date_from_datetime_keeps_local_day() {
        let dt = time::macros::datetime!(2024-03-10 23:30 -08:00);
        assert_eq!(Date::from(dt).to_string(), "2024-03-10");
    }

    #[test]
    fn column_types_per_dialect() {
        let cases: Vec<(&str, fn(&Dialect) -> Option<&'static str>, [&str; 3])> = vec![
            ("bool", bool::column_type, ["BOOLEAN", "BOOLEAN", "BOOLEAN"]),
            ("i8", i8::column_type, ["TINYINT", "SMALLINT", "INTEGER"]),
            ("i32", i32::column_type, ["INT", "INTEGER", "INTEGER"]),
            ("u8", u8::column_type, ["TINYINT UNSIGNED", "SMALLINT", "INTEGER"]),
            ("u16", u16::column_type, ["SMALLINT UNSIGNED", "INTEGER", "INTEGER"]),
            ("u32", u32::column_type, ["INT UNSIGNED", "BIGINT", "INTEGER"]),
            ("f32", f32::column_type, ["FLOAT", "REAL", "REAL"]),
            ("f64", f64::column_type, ["DOUBLE", "DOUBLE PRECISION", "REAL"]),
            ("string", String::column_type, ["LONGTEXT", "TEXT", "TEXT"]),
            ("bytes", Vec::<u8>::column_type, ["LONGBLOB", "BYTEA", "BLOB"]),
            ("json", Json::<()>::column_type, ["JSON", "JSONB", "JSON"]),
            ("json map", JsonMap::column_type, ["JSON", "JSONB", "JSON"]),
            ("uuid", Uuid::column_type, ["LONGTEXT", "UUID", "TEXT"]),
            ("bin uuid", BinUuid::column_type, ["BINARY(16)", "BYTEA", "BLOB"]),
            ("date", Date::column_type, ["DATE", "DATE", "DATE"]),
            ("time", Time::column_type, ["TIME", "TIME", "TIME"]),
            ("cidr", Cidr::column_type, ["VARCHAR(43)", "CIDR", "TEXT"]),
            ("inet", Inet::column_type, ["VARCHAR(39)", "INET", "TEXT"]),
            ("nanoid", NanoId::column_type, ["VARCHAR(12)", "VARCHAR(12)", "VARCHAR(12)"]),
            ("null uuid", Null::<Uuid>::column_type, ["LONGTEXT", "UUID", "TEXT"]),
        ];
        let dialects = [Dialect::MySql, Dialect::Postgres, Dialect::Sqlite];
        for (name, column_type, expected) in cases {
            for (dialect, ddl) in dialects.iter().zip(expected) {
                assert_eq!(column_type(dialect), Some(ddl), "{name} on {dialect}");
            }
            assert_eq!(column_type(&Dialect::from_name("oracle")), None, "{name}");
        }
    }

    #[test]
    fn nanoid_generates_on_encode() -> anyhow::Result<()> {
        let first = NanoId::default().encode()?;
        let second = NanoId::default().encode()?;
        assert_eq!(first.as_text()?.len(), 12);
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn json_serde_matches_storage_format() -> anyhow::Result<()> {
        #[derive(Serialize, Deserialize)]
        struct Row {
            day: Date,
            at: Time,
            raw: RawJson,
            note: Null<String>,
        }

        let text = r#"{"day":"2021-08-01","at":"01:02:03","raw":{"k":[1]},"note":null}"#;
        let row: Row = serde_json::from_str(text)?;
        assert_eq!(row.day, Date::new(2021, 8, 1)?);
        assert_eq!(row.at, Time::new(1, 2, 3, 0)?);
        assert_eq!(row.raw.as_str(), r#"{"k":[1]}"#);
        assert!(row.note.is_null());

        assert_eq!(serde_json::to_string(&row)?, text);
        Ok(())
    }
}
