//! vCard fixtures modelled on what phones and mail clients export.

/// Android contacts export (vCard 2.1, quoted-printable UTF-8).
pub const ANDROID_21: &str = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:=C3=96zt=C3=BCrk;Bu=C4=9Fra;;;\r\n\
FN;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:Bu=C4=9Fra =C3=96zt=C3=BCrk\r\n\
TEL;CELL:0532 123 45 67\r\n\
TEL;HOME:0212 555 44 33\r\n\
EMAIL;HOME:bugra@example.com\r\n\
NOTE;ENCODING=QUOTED-PRINTABLE;CHARSET=UTF-8:=C4=B0lk sat=C4=B1r=0A=\r\n\
ikinci sat=C4=B1r\r\n\
END:VCARD\r\n";

/// iOS contacts export (vCard 3.0 with grouped properties).
pub const IOS_30: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
PRODID:-//Apple Inc.//iPhone OS 17.0//EN\r\n\
N:Smith;Jane;;;\r\n\
FN:Jane Smith\r\n\
ORG:Acme Corporation;Engineering;\r\n\
TITLE:Senior Engineer\r\n\
item1.EMAIL;type=INTERNET;type=pref:jane@example.com\r\n\
item1.X-ABLabel:_$!<Other>!$_\r\n\
TEL;type=CELL;type=VOICE;type=pref:+90 532 987 65 43\r\n\
item2.ADR;type=HOME;type=pref:;;Bağdat Cd. 5;İstanbul;;34710;Türkiye\r\n\
BDAY;value=date:1990-05-17\r\n\
URL;type=pref:https://example.com\r\n\
PHOTO;ENCODING=b;TYPE=JPEG:/9j/4AA=\r\n\
END:VCARD\r\n";

/// vCard 4.0 with truncated dates and a data URI photo.
pub const RFC_40: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Simon Perreault\r\n\
N:Perreault;Simon;;;ing. jr,M.Sc.\r\n\
BDAY:--0203\r\n\
ANNIVERSARY:20090808T1430-0500\r\n\
TEL;VALUE=uri;TYPE=work,voice;PREF=1:tel:+1-418-656-9254;ext=102\r\n\
EMAIL;TYPE=work:simon.perreault@viagenie.ca\r\n\
PHOTO:data:image/png;base64,iVBORw0KGgo=\r\n\
END:VCARD\r\n";
